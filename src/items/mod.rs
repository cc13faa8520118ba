//! Item definitions and inventory types.

pub mod data;
pub mod types;

pub use data::{all_items, get_item};
pub use types::{InventoryItem, ItemDef, ItemEffect, ItemId, Rarity};
