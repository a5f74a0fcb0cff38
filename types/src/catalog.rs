//! Reward catalog records: rarity tiers, reward items, and case definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of rarity tiers, ordered from most to least common.
///
/// The draw probability of each tier lives in the engine's rarity table;
/// the order here is the order that table is walked in. Tiers are part of
/// the data model and never change at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Number of tiers.
    pub const COUNT: usize = 5;

    /// All tiers in walk order.
    pub const ALL: [Rarity; Rarity::COUNT] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Dense index for per-tier bucketing.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a reward item template.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a case definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A reward item template.
///
/// Cases reference templates with replacement: winning an item copies it
/// into the winner's inventory and never depletes the case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    pub id: ItemId,
    pub rarity: Rarity,
    pub name: String,
    pub image: String,
}

/// A purchasable case: a price and a pool of possible reward items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDefinition {
    pub id: CaseId,
    pub name: String,
    /// Price per single opening, in credits. Always greater than zero.
    pub price: u64,
    pub image: String,
    /// Reward pool. Never empty for a well-formed case.
    pub items: Vec<RewardItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_indices_are_dense_and_ordered() {
        for (position, rarity) in Rarity::ALL.iter().enumerate() {
            assert_eq!(rarity.index(), position);
        }
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = CaseId::from("mil-spec");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""mil-spec""#);
        let back: CaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
