//! Player account records.

use crate::catalog::RewardItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a player account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A player account.
///
/// `inventory` is ordered most-recent-first. `version` is the optimistic
/// concurrency token owned by the account store: it must be carried back
/// unchanged into `save_user`, and only the store bumps it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub avatar: String,
    #[serde(rename = "walletBalance")]
    pub wallet_balance: u64,
    pub xp: u64,
    pub level: u32,
    pub inventory: Vec<RewardItem>,
    #[serde(default)]
    pub version: u64,
}

/// The slice of an account that is safe to show to every observer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub name: String,
    pub id: UserId,
    #[serde(rename = "profilePicture")]
    pub profile_picture: String,
}

impl From<&UserAccount> for PublicProfile {
    fn from(account: &UserAccount) -> Self {
        Self {
            name: account.display_name.clone(),
            id: account.id.clone(),
            profile_picture: account.avatar.clone(),
        }
    }
}
