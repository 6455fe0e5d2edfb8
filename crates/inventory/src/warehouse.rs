use std::collections::HashMap;

use warehouse_core::{DomainError, DomainResult, Entity, MaterialTypeId, WarehouseId};

use crate::material::{Material, MaterialType};

/// Operations every material store supports.
///
/// Transfers take the destination as `&mut dyn Inventory`, so a store can move
/// stock into any other implementation. A store cannot be its own destination:
/// `&mut self` and the destination borrow may not alias.
pub trait Inventory {
    /// Add a material type that is not stocked yet.
    ///
    /// Fails with `InvalidQuantity`, `ExceedingCapacity` or
    /// `MaterialAlreadyExists`.
    fn add_material(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<MaterialType>;

    /// Add `quantity` to a stocked material type.
    ///
    /// Capacity is checked against `quantity`, not the resulting total, so
    /// repeated updates can push the total above `maximum_capacity`.
    fn update_material_quantity(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<()>;

    /// Same rules as [`Inventory::update_material_quantity`], returning the
    /// new total.
    fn upgrade_material_quantity(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<i64>;

    /// Remove the material type and all of its stock.
    fn remove_material(&mut self, material_type: &MaterialType) -> DomainResult<MaterialType>;

    /// Subtract `quantity` from a stocked material type and return it.
    ///
    /// The current stock is not consulted: the total may go negative.
    fn drop_some_quantity(&mut self, material_type: &MaterialType, quantity: i64)
    -> DomainResult<i64>;

    /// Every material held, in no particular order.
    fn list_all_materials(&self) -> Vec<Material>;

    fn contains_material(&self, material_type: &MaterialType) -> bool;

    /// On-hand quantity of a material type held by this store.
    fn material_quantity(&self, material_type: &MaterialType) -> DomainResult<i64>;

    /// Existence is checked against `self`; the quantity is read from `store`.
    ///
    /// Both may be the same store. When they differ and `store` lacks the
    /// material, this fails with `MaterialNotFound` as well.
    fn get_material_quantity(
        &self,
        store: &dyn Inventory,
        material_type: &MaterialType,
    ) -> DomainResult<i64> {
        if !self.contains_material(material_type) {
            return Err(DomainError::material_not_found(material_type.name()));
        }
        store.material_quantity(material_type)
    }

    /// Move the whole stock of `material_type` into `destination`.
    ///
    /// The source entry is removed only once the destination accepted the
    /// quantity; on failure the source is left untouched.
    fn transfer_full_material(
        &mut self,
        destination: &mut dyn Inventory,
        material_type: &MaterialType,
    ) -> DomainResult<i64> {
        let quantity = self.material_quantity(material_type)?;
        deposit(destination, material_type, quantity)?;
        self.remove_material(material_type)?;

        tracing::debug!(material = material_type.name(), quantity, "transferred full material");
        Ok(quantity)
    }

    /// Move `quantity` units of `material_type` into `destination`.
    ///
    /// The quantity and the source entry are checked before the destination is
    /// touched, so a rejected transfer changes neither store.
    fn transfer_some_quantity_of_material(
        &mut self,
        destination: &mut dyn Inventory,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<i64> {
        material_type.check_quantity(quantity)?;
        self.material_quantity(material_type)?
            .checked_sub(quantity)
            .ok_or_else(|| {
                DomainError::overflow(format!("{} stock underflowed", material_type.name()))
            })?;

        deposit(destination, material_type, quantity)?;
        let moved = self.drop_some_quantity(material_type, quantity)?;

        tracing::debug!(material = material_type.name(), quantity = moved, "transferred material");
        Ok(moved)
    }
}

/// Add to the destination if absent, otherwise top it up.
fn deposit(
    destination: &mut dyn Inventory,
    material_type: &MaterialType,
    quantity: i64,
) -> DomainResult<()> {
    if destination.contains_material(material_type) {
        destination.update_material_quantity(material_type, quantity)
    } else {
        destination.add_material(material_type, quantity).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Stock {
    material_type: MaterialType,
    quantity: i64,
}

/// In-memory warehouse: material type id → (type, on-hand quantity).
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    id: WarehouseId,
    materials: HashMap<MaterialTypeId, Stock>,
}

impl Warehouse {
    /// Empty warehouse with a fresh identifier.
    pub fn new() -> Self {
        Self::with_id(WarehouseId::new())
    }

    pub fn with_id(id: WarehouseId) -> Self {
        Self {
            id,
            materials: HashMap::new(),
        }
    }

    /// Warehouse seeded with an initial stock.
    ///
    /// Seed quantities are taken as-is; only duplicate material types are
    /// rejected.
    pub fn with_materials(materials: impl IntoIterator<Item = Material>) -> DomainResult<Self> {
        let mut warehouse = Self::new();
        for material in materials {
            let id = material.id();
            if warehouse.materials.contains_key(&id) {
                return Err(DomainError::material_already_exists(material.name()));
            }
            warehouse.materials.insert(
                id,
                Stock {
                    material_type: material.material_type,
                    quantity: material.quantity,
                },
            );
        }
        Ok(warehouse)
    }

    pub fn id_typed(&self) -> WarehouseId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Quantity held for a material type id, if stocked.
    pub fn quantity_of(&self, id: &MaterialTypeId) -> Option<i64> {
        self.materials.get(id).map(|s| s.quantity)
    }

    /// Borrowing view over the stock, in no particular order.
    pub fn materials(&self) -> impl Iterator<Item = (&MaterialType, i64)> + '_ {
        self.materials
            .values()
            .map(|s| (&s.material_type, s.quantity))
    }

    /// Sum of all on-hand quantities.
    pub fn total_quantity(&self) -> i64 {
        self.materials.values().map(|s| s.quantity).sum()
    }

    fn stock_mut(&mut self, material_type: &MaterialType) -> DomainResult<&mut Stock> {
        self.materials
            .get_mut(&material_type.id_typed())
            .ok_or_else(|| DomainError::material_not_found(material_type.name()))
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Inventory for Warehouse {
    fn add_material(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<MaterialType> {
        material_type.check_quantity(quantity)?;

        let id = material_type.id_typed();
        if self.materials.contains_key(&id) {
            return Err(DomainError::material_already_exists(material_type.name()));
        }
        self.materials.insert(
            id,
            Stock {
                material_type: material_type.clone(),
                quantity,
            },
        );

        tracing::debug!(
            warehouse_id = %self.id,
            material = material_type.name(),
            quantity,
            "material added"
        );
        Ok(material_type.clone())
    }

    fn update_material_quantity(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<()> {
        self.upgrade_material_quantity(material_type, quantity).map(|_| ())
    }

    fn upgrade_material_quantity(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<i64> {
        material_type.check_quantity(quantity)?;

        let warehouse_id = self.id;
        let stock = self.stock_mut(material_type)?;
        stock.quantity = stock.quantity.checked_add(quantity).ok_or_else(|| {
            DomainError::overflow(format!("{} stock overflowed", material_type.name()))
        })?;

        tracing::debug!(
            warehouse_id = %warehouse_id,
            material = material_type.name(),
            delta = quantity,
            total = stock.quantity,
            "material quantity updated"
        );
        Ok(stock.quantity)
    }

    fn remove_material(&mut self, material_type: &MaterialType) -> DomainResult<MaterialType> {
        let removed = self
            .materials
            .remove(&material_type.id_typed())
            .ok_or_else(|| DomainError::material_not_found(material_type.name()))?;

        tracing::debug!(
            warehouse_id = %self.id,
            material = material_type.name(),
            quantity = removed.quantity,
            "material removed"
        );
        Ok(removed.material_type)
    }

    fn drop_some_quantity(
        &mut self,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<i64> {
        material_type.check_quantity(quantity)?;

        let warehouse_id = self.id;
        let stock = self.stock_mut(material_type)?;
        stock.quantity = stock.quantity.checked_sub(quantity).ok_or_else(|| {
            DomainError::overflow(format!("{} stock underflowed", material_type.name()))
        })?;

        tracing::debug!(
            warehouse_id = %warehouse_id,
            material = material_type.name(),
            dropped = quantity,
            total = stock.quantity,
            "material quantity dropped"
        );
        Ok(quantity)
    }

    fn list_all_materials(&self) -> Vec<Material> {
        self.materials
            .values()
            .map(|s| Material::new(s.material_type.clone(), s.quantity))
            .collect()
    }

    fn contains_material(&self, material_type: &MaterialType) -> bool {
        self.materials.contains_key(&material_type.id_typed())
    }

    fn material_quantity(&self, material_type: &MaterialType) -> DomainResult<i64> {
        self.quantity_of(&material_type.id_typed())
            .ok_or_else(|| DomainError::material_not_found(material_type.name()))
    }
}
