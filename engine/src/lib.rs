//! Casedrop reward resolution engine.
//!
//! This crate owns the one transaction in the system with real invariants:
//! a paying case-opening request that draws rewards, debits the wallet,
//! grows the inventory, advances progression, and publishes the outcome.
//!
//! ## Invariants
//! - Monetary conservation: a successful commit debits exactly
//!   `price * quantity`, and nothing else.
//! - Exactly-once mutation: the funds check and the debit are atomic per
//!   account. Commits go through a versioned `save_user`; a version
//!   conflict reruns the whole transaction against a fresh read.
//! - Broadcast-after-commit: outcome events fire strictly after the store
//!   write succeeds and can never roll it back.
//!
//! ## Determinism
//! Randomness enters only through the injected [`rand::Rng`]; everything
//! else is a pure function of the loaded records. Tests drive the same
//! paths with seeded generators.
//!
//! The primary entrypoint is [`CaseOpening`].

pub mod broadcast;
pub mod memory;
pub mod opening;
pub mod progression;
pub mod rarity;
pub mod selector;
pub mod store;


pub use broadcast::{NullBroadcaster, RealtimeBroadcaster};
pub use memory::MemoryStore;
pub use opening::{CaseOpening, OpenError, OpenResult, MAX_OPEN_QUANTITY, MIN_OPEN_QUANTITY};
pub use progression::{Progression, ProgressionUpdater, SpendCurve};
pub use rarity::{draw_tier, tier_for_roll, RarityTier, RARITY_TABLE};
pub use selector::select_winning_item;
pub use store::{AccountStore, CatalogStore, StoreError};
