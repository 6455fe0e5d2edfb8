//! User ledger module.
//!
//! Money, gems and level counters for a user plus the warehouses assigned to
//! them. Pure domain logic only: no IO, no persistence concerns.

pub mod functionalities;
pub mod user;

pub use functionalities::{UserFunctionalities, UserLedger};
pub use user::{User, UserSummary, WarehouseSlot};
