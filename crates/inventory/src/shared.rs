//! Lock-guarded warehouse handle for multi-caller use.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use warehouse_core::{DomainError, DomainResult, WarehouseId};

use crate::material::MaterialType;
use crate::warehouse::{Inventory, Warehouse};

/// Cloneable handle to a warehouse behind one `RwLock`.
///
/// Transfers lock both warehouses in a stable order (warehouse id, then
/// allocation address), so two callers moving stock in opposite directions
/// cannot deadlock.
#[derive(Debug, Clone)]
pub struct SharedWarehouse {
    id: WarehouseId,
    inner: Arc<RwLock<Warehouse>>,
}

impl SharedWarehouse {
    pub fn new(warehouse: Warehouse) -> Self {
        Self {
            id: warehouse.id_typed(),
            inner: Arc::new(RwLock::new(warehouse)),
        }
    }

    pub fn id(&self) -> WarehouseId {
        self.id
    }

    /// Run `f` against a shared borrow of the warehouse.
    pub fn read<R>(&self, f: impl FnOnce(&Warehouse) -> R) -> DomainResult<R> {
        let guard = self
            .inner
            .read()
            .map_err(|_| DomainError::lock_poisoned(format!("warehouse {}", self.id)))?;
        Ok(f(&*guard))
    }

    /// Run a fallible mutation under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Warehouse) -> DomainResult<R>) -> DomainResult<R> {
        let mut guard = self.lock_write()?;
        f(&mut *guard)
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DomainResult<Warehouse> {
        self.read(Warehouse::clone)
    }

    pub fn transfer_full_material(
        &self,
        destination: &SharedWarehouse,
        material_type: &MaterialType,
    ) -> DomainResult<i64> {
        let (mut source, mut target) = self.lock_pair(destination)?;
        source.transfer_full_material(&mut *target, material_type)
    }

    pub fn transfer_some_quantity_of_material(
        &self,
        destination: &SharedWarehouse,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<i64> {
        let (mut source, mut target) = self.lock_pair(destination)?;
        source.transfer_some_quantity_of_material(&mut *target, material_type, quantity)
    }

    fn lock_write(&self) -> DomainResult<RwLockWriteGuard<'_, Warehouse>> {
        self.inner
            .write()
            .map_err(|_| DomainError::lock_poisoned(format!("warehouse {}", self.id)))
    }

    fn lock_order_key(&self) -> (WarehouseId, usize) {
        (self.id, Arc::as_ptr(&self.inner) as usize)
    }

    /// Write-lock `self` and `other`, returned as (self, other).
    fn lock_pair<'a>(
        &'a self,
        other: &'a SharedWarehouse,
    ) -> DomainResult<(RwLockWriteGuard<'a, Warehouse>, RwLockWriteGuard<'a, Warehouse>)> {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return Err(DomainError::validation(format!(
                "cannot transfer warehouse {} into itself",
                self.id
            )));
        }

        if self.lock_order_key() < other.lock_order_key() {
            let first = self.lock_write()?;
            let second = other.lock_write()?;
            Ok((first, second))
        } else {
            let second = other.lock_write()?;
            let first = self.lock_write()?;
            Ok((first, second))
        }
    }
}

impl From<Warehouse> for SharedWarehouse {
    fn from(warehouse: Warehouse) -> Self {
        Self::new(warehouse)
    }
}
