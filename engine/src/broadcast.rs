//! Outcome publication contract.
//!
//! Publication is best-effort and strictly post-commit: the orchestrator
//! calls these only after `save_user` succeeds, and neither call can fail
//! the transaction. Implementations log their own delivery failures.

use casedrop_types::{AccountUpdateEvent, CaseOpenedEvent, UserId};
use std::sync::Arc;

pub trait RealtimeBroadcaster: Send + Sync {
    /// Publish to every connected observer (public feed). At-most-once
    /// per observer, no retry, nothing queued for the disconnected.
    fn publish_outcome(&self, event: &CaseOpenedEvent);

    /// Push to the one room scoped to `user`. Dropped silently when the
    /// user has no live connection.
    fn publish_account_update(&self, user: &UserId, event: &AccountUpdateEvent);
}

impl<T: RealtimeBroadcaster + ?Sized> RealtimeBroadcaster for Arc<T> {
    fn publish_outcome(&self, event: &CaseOpenedEvent) {
        (**self).publish_outcome(event)
    }

    fn publish_account_update(&self, user: &UserId, event: &AccountUpdateEvent) {
        (**self).publish_account_update(user, event)
    }
}

/// Broadcaster that delivers nowhere. For tests and headless tooling.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBroadcaster;

impl RealtimeBroadcaster for NullBroadcaster {
    fn publish_outcome(&self, _event: &CaseOpenedEvent) {}

    fn publish_account_update(&self, _user: &UserId, _event: &AccountUpdateEvent) {}
}
