//! `warehouse-core` — shared domain building blocks.
//!
//! Error taxonomy, strongly-typed identifiers and the entity/value-object
//! markers used by the inventory and ledger crates. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{MaterialTypeId, UserId, WarehouseId};
pub use value_object::ValueObject;
