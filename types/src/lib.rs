//! Common types used throughout casedrop.
//!
//! This crate holds the long-lived records (catalog, accounts), the
//! per-request values, and the realtime event payloads. It is deliberately
//! transport-free: the gateway decides how these travel, the engine only
//! decides what they mean.

pub mod account;
pub mod api;
pub mod catalog;
pub mod events;

pub use account::{PublicProfile, UserAccount, UserId};
pub use api::{ErrorBody, OpenCaseRequest, OpenCaseResponse};
pub use catalog::{CaseDefinition, CaseId, ItemId, Rarity, RewardItem};
pub use events::{AccountUpdateEvent, CaseOpenedEvent};
