//! Persistence contracts the engine consumes.
//!
//! The engine borrows long-lived records for the duration of one request
//! and writes back a single updated account. `save_user` is a
//! compare-version-and-swap: the write either lands whole or reports a
//! conflict for the caller to retry. What backs these traits (document
//! store, SQL, memory) is someone else's decision.

use casedrop_types::{CaseDefinition, CaseId, UserAccount, UserId};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Another writer committed this account first; re-read and retry.
    #[error("account version conflict")]
    VersionConflict,
    /// The backing store could not serve the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the case catalog.
pub trait CatalogStore: Send + Sync {
    fn case_by_id(&self, id: &CaseId) -> Result<Option<CaseDefinition>, StoreError>;
}

/// Read/write access to player accounts.
pub trait AccountStore: Send + Sync {
    fn user_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError>;

    /// Persist `account` as one atomic write, keyed on `account.version`.
    ///
    /// Fails with [`StoreError::VersionConflict`] when the stored version
    /// no longer matches the one the caller read.
    fn save_user(&self, account: &UserAccount) -> Result<(), StoreError>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    fn case_by_id(&self, id: &CaseId) -> Result<Option<CaseDefinition>, StoreError> {
        (**self).case_by_id(id)
    }
}

impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    fn user_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError> {
        (**self).user_by_id(id)
    }

    fn save_user(&self, account: &UserAccount) -> Result<(), StoreError> {
        (**self).save_user(account)
    }
}
