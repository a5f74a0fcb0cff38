//! Static rarity table and the weighted tier draw.
//!
//! The table is the production drop configuration: five tiers whose
//! probabilities sum to 1.0, walked in fixed order. A roll is resolved by
//! accumulating probabilities until the roll is covered; if floating
//! rounding leaves the tail uncovered, the draw resolves to the last tier
//! instead of failing.

use casedrop_types::Rarity;
use rand::Rng;

/// One row of the drop table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RarityTier {
    pub rarity: Rarity,
    pub probability: f64,
}

/// Tier draw probabilities, in walk order. Immutable at runtime.
pub const RARITY_TABLE: [RarityTier; Rarity::COUNT] = [
    RarityTier {
        rarity: Rarity::Common,
        probability: 0.7992,
    },
    RarityTier {
        rarity: Rarity::Uncommon,
        probability: 0.1598,
    },
    RarityTier {
        rarity: Rarity::Rare,
        probability: 0.032,
    },
    RarityTier {
        rarity: Rarity::Epic,
        probability: 0.0064,
    },
    RarityTier {
        rarity: Rarity::Legendary,
        probability: 0.0026,
    },
];

/// Resolve a roll in `[0, 1)` against the cumulative table.
pub fn tier_for_roll(roll: f64) -> Rarity {
    let mut cumulative = 0.0;
    for tier in &RARITY_TABLE {
        cumulative += tier.probability;
        if roll <= cumulative {
            return tier.rarity;
        }
    }
    // Rounding left the tail uncovered; the draw still has to land somewhere.
    RARITY_TABLE[RARITY_TABLE.len() - 1].rarity
}

/// Draw a tier with the configured weights.
pub fn draw_tier<R: Rng + ?Sized>(rng: &mut R) -> Rarity {
    tier_for_roll(rng.gen::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_probabilities_sum_to_one() {
        let total: f64 = RARITY_TABLE.iter().map(|tier| tier.probability).sum();
        assert!((total - 1.0).abs() < 1e-12, "table sums to {total}");
    }

    #[test]
    fn test_roll_boundaries() {
        assert_eq!(tier_for_roll(0.0), Rarity::Common);
        assert_eq!(tier_for_roll(0.7992), Rarity::Common);
        assert_eq!(tier_for_roll(0.7993), Rarity::Uncommon);
        assert_eq!(tier_for_roll(0.9999), Rarity::Legendary);
        // Even a roll past every cumulative bucket resolves deterministically.
        assert_eq!(tier_for_roll(1.0), Rarity::Legendary);
    }

    #[test]
    fn test_draw_tier_matches_configured_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        const DRAWS: u32 = 100_000;

        let mut counts = [0u32; Rarity::COUNT];
        for _ in 0..DRAWS {
            counts[draw_tier(&mut rng).index()] += 1;
        }

        // 4-sigma band around p for a binomial with n = DRAWS.
        for tier in &RARITY_TABLE {
            let p = tier.probability;
            let observed = f64::from(counts[tier.rarity.index()]) / f64::from(DRAWS);
            let tolerance = 4.0 * (p * (1.0 - p) / f64::from(DRAWS)).sqrt();
            assert!(
                (observed - p).abs() < tolerance,
                "{}: observed {observed}, expected {p} +/- {tolerance}",
                tier.rarity
            );
        }
    }
}
