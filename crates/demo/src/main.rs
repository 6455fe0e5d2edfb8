//! Demonstration driver: two users, two warehouses each, a round of stock
//! moves and a round of ledger operations. Any failure aborts the run.

use anyhow::{Context, Result};

use warehouse_inventory::{Inventory, MaterialType, Warehouse, display};
use warehouse_ledger::{User, UserFunctionalities, UserLedger};

fn main() -> Result<()> {
    warehouse_observability::init();

    let iron = MaterialType::new(
        "Iron",
        "Metal used in construction",
        "resources/materials/iron.png",
        1000,
    )?;
    let coal = MaterialType::new(
        "Coal",
        "Used for energy production",
        "resources/materials/coal.png",
        1000,
    )?;

    let mut user1 = UserLedger::new(
        User::new("User1", 5, 100, 1)?
            .with_warehouses([(1, Warehouse::new()), (2, Warehouse::new())]),
    );
    let mut user2 = UserLedger::new(
        User::new("User2", 10, 200, 3)?
            .with_warehouses([(1, Warehouse::new()), (2, Warehouse::new())]),
    );

    shuffle_stock(&mut user1, &iron, &coal).context("User1 warehouse round")?;
    shuffle_stock(&mut user2, &iron, &coal).context("User2 warehouse round")?;
    println!("---------------------------------------------");

    ledger_round(&mut user1, &iron, &coal, (100, 10), (50, 5)).context("User1 ledger round")?;
    ledger_round(&mut user2, &iron, &coal, (432, 27), (40, 18)).context("User2 ledger round")?;

    println!("{}", serde_json::to_string_pretty(&user1.user().summary())?);
    println!("{}", serde_json::to_string_pretty(&user2.user().summary())?);

    tracing::info!("demo finished");
    Ok(())
}

fn shuffle_stock(ledger: &mut UserLedger, iron: &MaterialType, coal: &MaterialType) -> Result<()> {
    let user = ledger.user_mut();

    let first = user.warehouse_mut(1)?;
    first.add_material(iron, 10)?;
    first.add_material(coal, 15)?;
    first.update_material_quantity(iron, 20)?;
    first.update_material_quantity(coal, 40)?;
    first.remove_material(iron)?;
    first.remove_material(coal)?;
    first.add_material(iron, 10)?;
    first.add_material(coal, 15)?;
    first.drop_some_quantity(iron, 1)?;
    first.drop_some_quantity(coal, 4)?;

    user.transfer_full_between_slots(1, 2, iron)?;
    user.transfer_full_between_slots(1, 2, coal)?;
    user.transfer_between_slots(2, 1, iron, 1)?;
    user.transfer_between_slots(2, 1, coal, 1)?;

    for (slot, warehouse) in user.assigned_warehouses() {
        println!("{} warehouse {slot}:", user.username());
        display::print_listing(warehouse);
        for material in [iron, coal] {
            let quantity = warehouse.get_material_quantity(warehouse, material)?;
            tracing::info!(slot = *slot, material = material.name(), quantity, "stock level");
        }
    }

    Ok(())
}

fn ledger_round(
    ledger: &mut UserLedger,
    iron: &MaterialType,
    coal: &MaterialType,
    (money_in, gems_in): (i64, i64),
    (money_out, gems_out): (i64, i64),
) -> Result<()> {
    let name = ledger.user().username().to_string();

    println!("{name}'s money: {}", ledger.update_money(money_in)?);
    println!("{name}'s gems: {}", ledger.update_gems(gems_in)?);
    println!("{name}'s level: {}", ledger.upgrade_level());

    for slot in [1, 2] {
        for material in [iron, coal] {
            if let Some(quantity) = ledger.check_assigned_inventory(slot, material) {
                println!("Inventory for {material} in warehouse {slot}: {quantity}");
            }
        }
    }

    println!("{name}'s money: {}", ledger.spend_money(money_out)?);
    println!("{name}'s gems: {}", ledger.spend_gems(gems_out)?);
    Ok(())
}
