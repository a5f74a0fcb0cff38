//! In-memory reference store.
//!
//! Backs the gateway and the engine tests. Accounts are versioned: a save
//! only lands when the caller read the version it is replacing, which is
//! what linearizes concurrent transactions on one account. Distinct
//! accounts only share the map lock for the duration of a single read or
//! swap, so they proceed in parallel.

use crate::store::{AccountStore, CatalogStore, StoreError};
use casedrop_types::{CaseDefinition, CaseId, UserAccount, UserId};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    cases: RwLock<HashMap<CaseId, CaseDefinition>>,
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a case definition.
    pub fn insert_case(&self, case: CaseDefinition) {
        self.cases.write().unwrap().insert(case.id.clone(), case);
    }

    /// Seed or replace an account, keeping its version as given.
    pub fn insert_user(&self, account: UserAccount) {
        self.accounts
            .write()
            .unwrap()
            .insert(account.id.clone(), account);
    }

    pub fn case_count(&self) -> usize {
        self.cases.read().unwrap().len()
    }

    pub fn user_count(&self) -> usize {
        self.accounts.read().unwrap().len()
    }
}

impl CatalogStore for MemoryStore {
    fn case_by_id(&self, id: &CaseId) -> Result<Option<CaseDefinition>, StoreError> {
        Ok(self.cases.read().unwrap().get(id).cloned())
    }
}

impl AccountStore for MemoryStore {
    fn user_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.accounts.read().unwrap().get(id).cloned())
    }

    fn save_user(&self, account: &UserAccount) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().unwrap();
        let Some(stored) = accounts.get_mut(&account.id) else {
            return Err(StoreError::Unavailable(format!(
                "unknown account {}",
                account.id
            )));
        };
        if stored.version != account.version {
            return Err(StoreError::VersionConflict);
        }
        let mut next = account.clone();
        next.version = account.version.wrapping_add(1);
        *stored = next;
        Ok(())
    }
}
