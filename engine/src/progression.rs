//! Progression contract and the default levelling curve.

use casedrop_types::UserAccount;

/// Progression fields produced by a spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progression {
    pub xp: u64,
    pub level: u32,
}

/// Turns an amount spent into updated progression for an account.
///
/// Called exactly once per successful transaction, synchronously, before
/// the commit. Implementations must be deterministic per call and must
/// not persist anything; the orchestrator owns the single write.
pub trait ProgressionUpdater: Send + Sync {
    fn update(&self, account: &UserAccount, amount_spent: u64) -> Progression;
}

/// Default curve: one XP per credit spent; level `n` unlocks at `100 * n^2` XP.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpendCurve;

/// Levels above this are not awarded.
const MAX_LEVEL: u32 = 500;

impl SpendCurve {
    fn threshold(level: u32) -> u64 {
        100 * u64::from(level) * u64::from(level)
    }

    fn level_for_xp(xp: u64) -> u32 {
        let mut level = 1u32;
        while level < MAX_LEVEL && Self::threshold(level + 1) <= xp {
            level += 1;
        }
        level
    }
}

impl ProgressionUpdater for SpendCurve {
    fn update(&self, account: &UserAccount, amount_spent: u64) -> Progression {
        let xp = account.xp.saturating_add(amount_spent);
        Progression {
            xp,
            level: Self::level_for_xp(xp),
        }
    }
}
