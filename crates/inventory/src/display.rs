//! Human-readable listing of a store's contents.
//!
//! Kept apart from [`Inventory::list_all_materials`], which stays a pure
//! accessor.

use crate::warehouse::Inventory;

/// One `name: quantity` line per material, sorted by name.
pub fn format_listing(inventory: &dyn Inventory) -> String {
    let mut materials = inventory.list_all_materials();
    materials.sort_by(|a, b| a.name().cmp(b.name()));

    materials
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the listing to stdout. An empty store prints a blank line.
pub fn print_listing(inventory: &dyn Inventory) {
    println!("{}", format_listing(inventory));
}
