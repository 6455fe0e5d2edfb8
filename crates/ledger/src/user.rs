use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Entity, UserId};
use warehouse_inventory::{Inventory, MaterialType, Warehouse};

/// Index of a warehouse assigned to a user.
pub type WarehouseSlot = u32;

/// A player: currency balances, level and assigned warehouses.
///
/// Balances only change through [`crate::UserLedger`], which enforces the
/// positive-amount and no-overdraft rules.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: String,
    assigned_warehouses: BTreeMap<WarehouseSlot, Warehouse>,
    pub(crate) gems: i64,
    pub(crate) money: i64,
    pub(crate) level: u64,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        gems: i64,
        money: i64,
        level: u64,
    ) -> DomainResult<Self> {
        Self::with_id(UserId::new(), username, gems, money, level)
    }

    pub fn with_id(
        id: UserId,
        username: impl Into<String>,
        gems: i64,
        money: i64,
        level: u64,
    ) -> DomainResult<Self> {
        if gems < 0 {
            return Err(DomainError::validation(format!(
                "gems cannot be negative (got {gems})"
            )));
        }
        if money < 0 {
            return Err(DomainError::validation(format!(
                "money cannot be negative (got {money})"
            )));
        }

        Ok(Self {
            id,
            username: username.into(),
            assigned_warehouses: BTreeMap::new(),
            gems,
            money,
            level,
        })
    }

    /// Builder-style slot assignment.
    pub fn with_warehouses(
        mut self,
        warehouses: impl IntoIterator<Item = (WarehouseSlot, Warehouse)>,
    ) -> Self {
        self.assigned_warehouses.extend(warehouses);
        self
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn gems(&self) -> i64 {
        self.gems
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    pub fn assigned_warehouses(&self) -> &BTreeMap<WarehouseSlot, Warehouse> {
        &self.assigned_warehouses
    }

    /// Assign `warehouse` to `slot`, returning whatever occupied it before.
    pub fn assign_warehouse(&mut self, slot: WarehouseSlot, warehouse: Warehouse) -> Option<Warehouse> {
        self.assigned_warehouses.insert(slot, warehouse)
    }

    pub fn unassign_warehouse(&mut self, slot: WarehouseSlot) -> DomainResult<Warehouse> {
        self.assigned_warehouses
            .remove(&slot)
            .ok_or(DomainError::WarehouseNotFound(slot))
    }

    pub fn warehouse(&self, slot: WarehouseSlot) -> DomainResult<&Warehouse> {
        self.assigned_warehouses
            .get(&slot)
            .ok_or(DomainError::WarehouseNotFound(slot))
    }

    pub fn warehouse_mut(&mut self, slot: WarehouseSlot) -> DomainResult<&mut Warehouse> {
        self.assigned_warehouses
            .get_mut(&slot)
            .ok_or(DomainError::WarehouseNotFound(slot))
    }

    /// Move `quantity` units between two of this user's warehouses.
    pub fn transfer_between_slots(
        &mut self,
        from: WarehouseSlot,
        to: WarehouseSlot,
        material_type: &MaterialType,
        quantity: i64,
    ) -> DomainResult<i64> {
        self.with_slot_pair(from, to, |source, destination| {
            source.transfer_some_quantity_of_material(destination, material_type, quantity)
        })
    }

    /// Move the whole stock of a material between two of this user's warehouses.
    pub fn transfer_full_between_slots(
        &mut self,
        from: WarehouseSlot,
        to: WarehouseSlot,
        material_type: &MaterialType,
    ) -> DomainResult<i64> {
        self.with_slot_pair(from, to, |source, destination| {
            source.transfer_full_material(destination, material_type)
        })
    }

    /// Serializable view of the counters and slot layout.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            gems: self.gems,
            money: self.money,
            level: self.level,
            warehouse_slots: self.assigned_warehouses.keys().copied().collect(),
        }
    }

    // The source warehouse is lifted out of the map for the duration of `f`
    // and always put back, whatever `f` returns.
    fn with_slot_pair<R>(
        &mut self,
        from: WarehouseSlot,
        to: WarehouseSlot,
        f: impl FnOnce(&mut Warehouse, &mut Warehouse) -> DomainResult<R>,
    ) -> DomainResult<R> {
        if from == to {
            return Err(DomainError::validation(format!(
                "cannot transfer slot {from} into itself"
            )));
        }

        let mut source = self
            .assigned_warehouses
            .remove(&from)
            .ok_or(DomainError::WarehouseNotFound(from))?;
        let result = self
            .warehouse_mut(to)
            .and_then(|destination| f(&mut source, destination));
        self.assigned_warehouses.insert(from, source);

        result
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Snapshot of a user's counters, suitable for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub gems: i64,
    pub money: i64,
    pub level: u64,
    pub warehouse_slots: Vec<WarehouseSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iron() -> MaterialType {
        MaterialType::new("Iron", "Metal used in construction", "materials/iron.png", 1000)
            .unwrap()
    }

    fn user_with_two_slots() -> User {
        User::new("User1", 5, 100, 1)
            .unwrap()
            .with_warehouses([(1, Warehouse::new()), (2, Warehouse::new())])
    }

    #[test]
    fn negative_balances_are_rejected() {
        assert!(matches!(
            User::new("u", -1, 0, 1),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            User::new("u", 0, -1, 1),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn unknown_slot_is_reported() {
        let user = user_with_two_slots();
        assert_eq!(user.warehouse(3).unwrap_err(), DomainError::WarehouseNotFound(3));
    }

    #[test]
    fn assign_replaces_previous_warehouse() {
        let mut user = user_with_two_slots();
        let replacement = Warehouse::new();
        let replacement_id = replacement.id_typed();

        let previous = user.assign_warehouse(1, replacement);
        assert!(previous.is_some());
        assert_eq!(user.warehouse(1).unwrap().id_typed(), replacement_id);
    }

    #[test]
    fn transfer_between_slots_moves_stock() {
        let iron = iron();
        let mut user = user_with_two_slots();
        user.warehouse_mut(1).unwrap().add_material(&iron, 10).unwrap();

        assert_eq!(user.transfer_between_slots(1, 2, &iron, 4).unwrap(), 4);
        assert_eq!(user.warehouse(1).unwrap().material_quantity(&iron).unwrap(), 6);
        assert_eq!(user.warehouse(2).unwrap().material_quantity(&iron).unwrap(), 4);
    }

    #[test]
    fn failed_transfer_keeps_source_slot_assigned() {
        let iron = iron();
        let mut user = user_with_two_slots();
        user.warehouse_mut(1).unwrap().add_material(&iron, 10).unwrap();

        assert_eq!(
            user.transfer_full_between_slots(1, 9, &iron).unwrap_err(),
            DomainError::WarehouseNotFound(9)
        );
        assert_eq!(user.warehouse(1).unwrap().material_quantity(&iron).unwrap(), 10);
    }

    #[test]
    fn transfer_into_same_slot_is_rejected() {
        let mut user = user_with_two_slots();
        assert!(matches!(
            user.transfer_full_between_slots(1, 1, &iron()),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(user.assigned_warehouses().len(), 2);
    }

    #[test]
    fn summary_serializes_counters_and_slots() {
        let user = user_with_two_slots();
        let json = serde_json::to_value(user.summary()).unwrap();

        assert_eq!(json["username"], "User1");
        assert_eq!(json["money"], 100);
        assert_eq!(json["gems"], 5);
        assert_eq!(json["warehouse_slots"], serde_json::json!([1, 2]));
    }
}
