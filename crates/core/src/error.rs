//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic validation or lookup failure and is
/// recoverable by the caller. One variant per failure kind, so callers can
/// match instead of parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A material quantity was zero or negative.
    #[error("the quantity must be greater than 0 (got {0})")]
    InvalidQuantity(i64),

    /// A money amount was zero or negative.
    #[error("the amount of money must be greater than 0 (got {0})")]
    InvalidQuantityOfMoney(i64),

    /// A gems amount was zero or negative.
    #[error("the amount of gems must be greater than 0 (got {0})")]
    InvalidQuantityOfGems(i64),

    /// A single operation moved more units than the material type allows.
    #[error("moving {quantity} units of {material} would exceed the max capacity of {capacity}")]
    ExceedingCapacity {
        material: String,
        quantity: i64,
        capacity: i64,
    },

    /// Spending more money than the user holds.
    #[error("cannot spend {requested} money, only {available} available")]
    ExceedingAmountOfMoney { requested: i64, available: i64 },

    /// Spending more gems than the user holds.
    #[error("cannot spend {requested} gems, only {available} available")]
    ExceedingAmountOfGems { requested: i64, available: i64 },

    /// The material type is already stocked in the warehouse.
    #[error("material already exists: {0}")]
    MaterialAlreadyExists(String),

    /// The material type is not stocked in the warehouse.
    #[error("material not found: {0}")]
    MaterialNotFound(String),

    /// No warehouse is assigned to the requested slot.
    #[error("no warehouse assigned to slot {0}")]
    WarehouseNotFound(u32),

    /// A value failed validation (e.g. malformed constructor input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A checked addition overflowed.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// A shared store's lock was poisoned by a panicking holder.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn material_not_found(name: impl Into<String>) -> Self {
        Self::MaterialNotFound(name.into())
    }

    pub fn material_already_exists(name: impl Into<String>) -> Self {
        Self::MaterialAlreadyExists(name.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::ArithmeticOverflow(msg.into())
    }

    pub fn lock_poisoned(msg: impl Into<String>) -> Self {
        Self::LockPoisoned(msg.into())
    }
}
