//! The case-opening transaction.
//!
//! [`CaseOpening`] validates a paying request, runs the weighted draws,
//! applies the economic delta in memory, commits it as one versioned
//! write, and only then publishes the outcome. A version conflict reruns
//! the whole transaction against a fresh read, which is what makes the
//! funds check and the debit atomic per account: two concurrent openings
//! against one wallet can never both pass the check on a balance that
//! covers only one of them.

use crate::broadcast::RealtimeBroadcaster;
use crate::progression::ProgressionUpdater;
use crate::selector;
use crate::store::{AccountStore, CatalogStore, StoreError};
use casedrop_types::{
    AccountUpdateEvent, CaseDefinition, CaseId, CaseOpenedEvent, PublicProfile, RewardItem,
    UserAccount, UserId,
};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

/// Inclusive bounds on the per-request opening count.
pub const MIN_OPEN_QUANTITY: i64 = 1;
pub const MAX_OPEN_QUANTITY: i64 = 5;

/// Commit attempts before a contended account is reported as a store
/// failure instead of spinning.
const MAX_COMMIT_ATTEMPTS: u32 = 16;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("case {0} not found")]
    CaseNotFound(CaseId),
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("quantity {0} outside {MIN_OPEN_QUANTITY}..={MAX_OPEN_QUANTITY}")]
    InvalidQuantity(i64),
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },
    /// A case with an empty item pool reached the selector. Catalog
    /// invariants are supposed to prevent this upstream; the transaction
    /// aborts with no mutation.
    #[error("case {0} has no items")]
    EmptyCase(CaseId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Items won by one request, in draw order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenResult {
    pub won_items: Vec<RewardItem>,
}

/// The orchestrator. Collaborators are injected; it owns no state of its
/// own beyond them.
pub struct CaseOpening<C, A, P, B> {
    catalog: C,
    accounts: A,
    progression: P,
    broadcaster: B,
}

impl<C, A, P, B> CaseOpening<C, A, P, B>
where
    C: CatalogStore,
    A: AccountStore,
    P: ProgressionUpdater,
    B: RealtimeBroadcaster,
{
    pub fn new(catalog: C, accounts: A, progression: P, broadcaster: B) -> Self {
        Self {
            catalog,
            accounts,
            progression,
            broadcaster,
        }
    }

    /// Open `quantity` cases of `case_id` for `user_id`, drawing with the
    /// process RNG.
    pub fn open(
        &self,
        user_id: &UserId,
        case_id: &CaseId,
        quantity: i64,
    ) -> Result<OpenResult, OpenError> {
        self.open_with_rng(user_id, case_id, quantity, &mut rand::thread_rng())
    }

    /// RNG-injected variant of [`open`](Self::open); the transaction is
    /// otherwise identical.
    pub fn open_with_rng<R: Rng + ?Sized>(
        &self,
        user_id: &UserId,
        case_id: &CaseId,
        quantity: i64,
        rng: &mut R,
    ) -> Result<OpenResult, OpenError> {
        let case = self
            .catalog
            .case_by_id(case_id)?
            .ok_or_else(|| OpenError::CaseNotFound(case_id.clone()))?;

        let mut attempts = 0;
        loop {
            let account = self
                .accounts
                .user_by_id(user_id)?
                .ok_or_else(|| OpenError::UserNotFound(user_id.clone()))?;

            match self.attempt(&case, account, quantity, rng) {
                Ok((committed, won_items)) => {
                    debug!(
                        user = %user_id,
                        case = %case_id,
                        quantity,
                        balance = committed.wallet_balance,
                        "case opening committed"
                    );
                    self.publish(&case, &committed, &won_items);
                    return Ok(OpenResult { won_items });
                }
                Err(OpenError::Store(StoreError::VersionConflict)) => {
                    attempts += 1;
                    if attempts >= MAX_COMMIT_ATTEMPTS {
                        warn!(user = %user_id, attempts, "giving up on contended account");
                        return Err(OpenError::Store(StoreError::VersionConflict));
                    }
                    // Another transaction for this account landed first;
                    // rerun everything against the fresh state.
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One full validate-draw-apply-commit pass over a freshly read
    /// account. Nothing is visible to anyone unless `save_user` succeeds.
    fn attempt<R: Rng + ?Sized>(
        &self,
        case: &CaseDefinition,
        mut account: UserAccount,
        quantity: i64,
        rng: &mut R,
    ) -> Result<(UserAccount, Vec<RewardItem>), OpenError> {
        if !(MIN_OPEN_QUANTITY..=MAX_OPEN_QUANTITY).contains(&quantity) {
            return Err(OpenError::InvalidQuantity(quantity));
        }

        let spend = case.price.saturating_mul(quantity as u64);
        if account.wallet_balance < spend {
            return Err(OpenError::InsufficientFunds {
                required: spend,
                available: account.wallet_balance,
            });
        }

        let mut won_items = Vec::with_capacity(quantity as usize);
        for _ in 0..quantity {
            let item = selector::select_winning_item(case, rng)
                .ok_or_else(|| OpenError::EmptyCase(case.id.clone()))?;
            won_items.push(item.clone());
        }

        let progression = self.progression.update(&account, spend);

        // The whole delta is applied in memory; the save below is the one
        // visible commit point.
        account.wallet_balance -= spend;
        account.inventory.splice(0..0, won_items.iter().cloned());
        account.xp = progression.xp;
        account.level = progression.level;

        self.accounts.save_user(&account)?;
        Ok((account, won_items))
    }

    /// Post-commit only. Delivery failures stay inside the broadcaster and
    /// never surface here.
    fn publish(&self, case: &CaseDefinition, account: &UserAccount, won_items: &[RewardItem]) {
        self.broadcaster.publish_outcome(&CaseOpenedEvent {
            winning_items: won_items.to_vec(),
            user: PublicProfile::from(account),
            case_image: case.image.clone(),
        });
        self.broadcaster.publish_account_update(
            &account.id,
            &AccountUpdateEvent {
                wallet_balance: account.wallet_balance,
                xp: account.xp,
                level: account.level,
            },
        );
    }
}
