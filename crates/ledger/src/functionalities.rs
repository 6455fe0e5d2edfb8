use warehouse_core::{DomainError, DomainResult};
use warehouse_inventory::{Inventory, MaterialType};

use crate::user::{User, WarehouseSlot};

/// Operations a user can perform on their own ledger.
pub trait UserFunctionalities {
    /// Raise the level by exactly one and return the new level.
    fn upgrade_level(&mut self) -> u64;

    /// Quantity of `material_type` held by `warehouse`, propagating lookup
    /// failures.
    fn try_check_inventory(
        &self,
        warehouse: &dyn Inventory,
        material_type: &MaterialType,
    ) -> DomainResult<i64> {
        warehouse.get_material_quantity(warehouse, material_type)
    }

    /// Display-oriented variant of [`UserFunctionalities::try_check_inventory`]:
    /// the outcome is logged and a missing material yields `None`.
    fn check_inventory(&self, warehouse: &dyn Inventory, material_type: &MaterialType) -> Option<i64> {
        match self.try_check_inventory(warehouse, material_type) {
            Ok(quantity) => {
                tracing::info!(material = material_type.name(), quantity, "inventory checked");
                Some(quantity)
            }
            Err(err) => {
                tracing::warn!(material = material_type.name(), error = %err, "inventory check failed");
                None
            }
        }
    }

    fn update_money(&mut self, quantity: i64) -> DomainResult<i64>;

    fn update_gems(&mut self, quantity: i64) -> DomainResult<i64>;

    fn spend_money(&mut self, quantity: i64) -> DomainResult<i64>;

    fn spend_gems(&mut self, quantity: i64) -> DomainResult<i64>;
}

/// Owns a [`User`] and applies the ledger rules to it.
#[derive(Debug, Clone)]
pub struct UserLedger {
    user: User,
}

impl UserLedger {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }

    /// [`UserFunctionalities::check_inventory`] against one of the user's own
    /// warehouses. An unknown slot is logged and yields `None`.
    pub fn check_assigned_inventory(
        &self,
        slot: WarehouseSlot,
        material_type: &MaterialType,
    ) -> Option<i64> {
        match self.user.warehouse(slot) {
            Ok(warehouse) => self.check_inventory(warehouse, material_type),
            Err(err) => {
                tracing::warn!(slot, error = %err, "inventory check failed");
                None
            }
        }
    }

    pub fn try_check_assigned_inventory(
        &self,
        slot: WarehouseSlot,
        material_type: &MaterialType,
    ) -> DomainResult<i64> {
        let warehouse = self.user.warehouse(slot)?;
        self.try_check_inventory(warehouse, material_type)
    }
}

impl From<User> for UserLedger {
    fn from(user: User) -> Self {
        Self::new(user)
    }
}

fn credit(balance: i64, quantity: i64, what: &str) -> DomainResult<i64> {
    balance
        .checked_add(quantity)
        .ok_or_else(|| DomainError::overflow(format!("{what} balance overflowed")))
}

impl UserFunctionalities for UserLedger {
    fn upgrade_level(&mut self) -> u64 {
        self.user.level += 1;
        tracing::debug!(user_id = %self.user.id_typed(), level = self.user.level, "level upgraded");
        self.user.level
    }

    fn update_money(&mut self, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantityOfMoney(quantity));
        }
        self.user.money = credit(self.user.money, quantity, "money")?;

        tracing::debug!(user_id = %self.user.id_typed(), quantity, money = self.user.money, "money updated");
        Ok(self.user.money)
    }

    fn update_gems(&mut self, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantityOfGems(quantity));
        }
        self.user.gems = credit(self.user.gems, quantity, "gems")?;

        tracing::debug!(user_id = %self.user.id_typed(), quantity, gems = self.user.gems, "gems updated");
        Ok(self.user.gems)
    }

    fn spend_money(&mut self, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantityOfMoney(quantity));
        }
        if quantity > self.user.money {
            return Err(DomainError::ExceedingAmountOfMoney {
                requested: quantity,
                available: self.user.money,
            });
        }
        self.user.money -= quantity;

        tracing::debug!(user_id = %self.user.id_typed(), quantity, money = self.user.money, "money spent");
        Ok(self.user.money)
    }

    fn spend_gems(&mut self, quantity: i64) -> DomainResult<i64> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantityOfGems(quantity));
        }
        if quantity > self.user.gems {
            return Err(DomainError::ExceedingAmountOfGems {
                requested: quantity,
                available: self.user.gems,
            });
        }
        self.user.gems -= quantity;

        tracing::debug!(user_id = %self.user.id_typed(), quantity, gems = self.user.gems, "gems spent");
        Ok(self.user.gems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use warehouse_inventory::Warehouse;

    fn test_ledger() -> UserLedger {
        let user = User::new("User1", 5, 100, 45)
            .unwrap()
            .with_warehouses([(1, Warehouse::new())]);
        UserLedger::new(user)
    }

    fn coal() -> MaterialType {
        MaterialType::new("Coal", "Used for energy production", "materials/coal.png", 1000).unwrap()
    }

    #[test]
    fn upgrade_level_increments_by_one() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.user().level(), 45);
        assert_eq!(ledger.upgrade_level(), 46);
        assert_eq!(ledger.upgrade_level(), 47);
        assert_eq!(ledger.user().level(), 47);
    }

    #[test]
    fn update_money_rejects_zero() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.update_money(0), Err(DomainError::InvalidQuantityOfMoney(0)));
        assert_eq!(ledger.user().money(), 100);
    }

    #[test]
    fn update_money_returns_and_stores_new_total() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.update_money(1000).unwrap(), 1100);
        assert_eq!(ledger.user().money(), 1100);
    }

    #[test]
    fn update_gems_rejects_zero() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.update_gems(0), Err(DomainError::InvalidQuantityOfGems(0)));
    }

    #[test]
    fn update_gems_returns_new_total() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.update_gems(35).unwrap(), 40);
    }

    #[test]
    fn spend_money_failures() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.spend_money(0), Err(DomainError::InvalidQuantityOfMoney(0)));
        assert_eq!(
            ledger.spend_money(150),
            Err(DomainError::ExceedingAmountOfMoney {
                requested: 150,
                available: 100
            })
        );
        assert_eq!(ledger.user().money(), 100);
    }

    #[test]
    fn spend_money_after_update() {
        let mut ledger = test_ledger();
        ledger.update_money(500).unwrap();
        assert_eq!(ledger.spend_money(10).unwrap(), 590);
    }

    #[test]
    fn spend_entire_balance_is_allowed() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.spend_money(100).unwrap(), 0);
        assert_eq!(ledger.spend_gems(5).unwrap(), 0);
    }

    #[test]
    fn spend_gems_failures() {
        let mut ledger = test_ledger();
        assert_eq!(ledger.spend_gems(0), Err(DomainError::InvalidQuantityOfGems(0)));
        assert!(matches!(
            ledger.spend_gems(15000),
            Err(DomainError::ExceedingAmountOfGems { .. })
        ));
    }

    #[test]
    fn spend_gems_after_update() {
        let mut ledger = test_ledger();
        ledger.update_gems(350).unwrap();
        assert_eq!(ledger.spend_gems(150).unwrap(), 205);
    }

    #[test]
    fn update_money_overflow_is_reported() {
        let mut ledger = UserLedger::new(User::new("rich", 0, i64::MAX, 1).unwrap());
        assert!(matches!(
            ledger.update_money(1),
            Err(DomainError::ArithmeticOverflow(_))
        ));
        assert_eq!(ledger.user().money(), i64::MAX);
    }

    #[test]
    fn check_inventory_swallows_missing_material() {
        let ledger = test_ledger();
        let coal = coal();
        let warehouse = ledger.user().warehouse(1).unwrap();

        assert_eq!(ledger.check_inventory(warehouse, &coal), None);
        assert!(matches!(
            ledger.try_check_inventory(warehouse, &coal),
            Err(DomainError::MaterialNotFound(_))
        ));
    }

    #[test]
    fn check_assigned_inventory_reads_slot() {
        let mut ledger = test_ledger();
        let coal = coal();
        ledger
            .user_mut()
            .warehouse_mut(1)
            .unwrap()
            .add_material(&coal, 15)
            .unwrap();

        assert_eq!(ledger.check_assigned_inventory(1, &coal), Some(15));
        assert_eq!(ledger.try_check_assigned_inventory(1, &coal).unwrap(), 15);
        assert_eq!(ledger.check_assigned_inventory(2, &coal), None);
        assert_eq!(
            ledger.try_check_assigned_inventory(2, &coal),
            Err(DomainError::WarehouseNotFound(2))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: balances never go negative, and a successful spend lowers
        /// the balance by exactly the amount spent.
        #[test]
        fn spending_never_overdraws(
            initial in 0i64..10_000,
            amounts in prop::collection::vec(-100i64..5_000, 1..20)
        ) {
            let mut ledger = UserLedger::new(User::new("p", initial, initial, 1).unwrap());

            for amount in amounts {
                let before = ledger.user().money();
                match ledger.spend_money(amount) {
                    Ok(after) => {
                        prop_assert_eq!(after, before - amount);
                        prop_assert_eq!(ledger.user().money(), after);
                    }
                    Err(DomainError::InvalidQuantityOfMoney(q)) => prop_assert!(q <= 0),
                    Err(DomainError::ExceedingAmountOfMoney { requested, available }) => {
                        prop_assert!(requested > available);
                        prop_assert_eq!(ledger.user().money(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
                prop_assert!(ledger.user().money() >= 0);

                let before = ledger.user().gems();
                match ledger.spend_gems(amount) {
                    Ok(after) => {
                        prop_assert_eq!(after, before - amount);
                        prop_assert_eq!(ledger.user().gems(), after);
                    }
                    Err(DomainError::InvalidQuantityOfGems(q)) => prop_assert!(q <= 0),
                    Err(DomainError::ExceedingAmountOfGems { requested, available }) => {
                        prop_assert!(requested > available);
                        prop_assert_eq!(ledger.user().gems(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
                prop_assert!(ledger.user().gems() >= 0);
            }
        }

        #[test]
        fn every_upgrade_adds_exactly_one(start in 0u64..1_000_000, upgrades in 1usize..50) {
            let mut ledger = UserLedger::new(User::new("p", 0, 0, start).unwrap());
            for _ in 0..upgrades {
                ledger.upgrade_level();
            }
            prop_assert_eq!(ledger.user().level(), start + upgrades as u64);
        }
    }
}
