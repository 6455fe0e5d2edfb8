//! Inventory domain module.
//!
//! Per-warehouse material bookkeeping: material types with a per-operation
//! capacity, a warehouse that maps material types to on-hand quantities, and
//! transfers between warehouses. Pure in-memory logic (no IO, no storage).

pub mod display;
pub mod material;
pub mod shared;
pub mod warehouse;

pub use material::{Material, MaterialType};
pub use shared::SharedWarehouse;
pub use warehouse::{Inventory, Warehouse};
