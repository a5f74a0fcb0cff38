//! Realtime event payloads.
//!
//! `CaseOpenedEvent` goes to every connected observer on the public feed;
//! `AccountUpdateEvent` goes only to the opener's private room. Both are
//! emitted strictly after the opening transaction commits.

use crate::account::PublicProfile;
use crate::catalog::RewardItem;
use serde::{Deserialize, Serialize};

/// Public feed payload emitted once per successful opening.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOpenedEvent {
    #[serde(rename = "winningItems")]
    pub winning_items: Vec<RewardItem>,
    pub user: PublicProfile,
    #[serde(rename = "caseImage")]
    pub case_image: String,
}

/// Private room payload pushed to the opener after the commit.
///
/// This is a live-UI convenience signal, not a durability guarantee: if
/// the user has no active connection, the event is dropped silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateEvent {
    #[serde(rename = "walletBalance")]
    pub wallet_balance: u64,
    pub xp: u64,
    pub level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemId, Rarity};
    use crate::UserId;

    #[test]
    fn test_case_opened_wire_shape() {
        let event = CaseOpenedEvent {
            winning_items: vec![RewardItem {
                id: ItemId::from("item-1"),
                rarity: Rarity::Common,
                name: "Sand Dune".to_string(),
                image: "sand-dune.png".to_string(),
            }],
            user: PublicProfile {
                name: "demo".to_string(),
                id: UserId::from("user-1"),
                profile_picture: "avatar.png".to_string(),
            },
            case_image: "case.png".to_string(),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("winningItems").is_some());
        assert!(value.get("caseImage").is_some());
        assert!(value["user"].get("profilePicture").is_some());
        assert_eq!(value["winningItems"][0]["rarity"], "common");
    }

    #[test]
    fn test_account_update_wire_shape() {
        let event = AccountUpdateEvent {
            wallet_balance: 70,
            xp: 30,
            level: 1,
        };

        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["walletBalance"], 70);
        assert_eq!(value["xp"], 30);
        assert_eq!(value["level"], 1);
    }
}
