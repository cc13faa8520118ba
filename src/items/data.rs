//! Static item definitions.

use super::types::{ItemDef, ItemEffect, ItemId, Rarity};
use crate::core::constants::{STONE_POUCH_MAX, STONE_POUCH_MIN};

/// Returns the full static item table.
pub fn all_items() -> &'static [ItemDef] {
    &ITEMS
}

/// Looks up an item definition by id.
pub fn get_item(id: ItemId) -> &'static ItemDef {
    ITEMS
        .iter()
        .find(|def| def.id == id)
        .expect("every ItemId has a table entry")
}

static ITEMS: [ItemDef; 12] = [
    ItemDef {
        id: ItemId::SpiritHerb,
        name: "Spirit Herb",
        rarity: Rarity::Common,
        min_danger: 0,
        effect: ItemEffect::Material,
        stackable: true,
    },
    ItemDef {
        id: ItemId::BeastCore,
        name: "Beast Core",
        rarity: Rarity::Uncommon,
        min_danger: 2,
        effect: ItemEffect::Material,
        stackable: true,
    },
    ItemDef {
        id: ItemId::StonePouch,
        name: "Worn Stone Pouch",
        rarity: Rarity::Common,
        min_danger: 0,
        effect: ItemEffect::StonePouch {
            min: STONE_POUCH_MIN,
            max: STONE_POUCH_MAX,
        },
        stackable: true,
    },
    ItemDef {
        id: ItemId::GrandStonePouch,
        name: "Grand Stone Pouch",
        rarity: Rarity::Rare,
        min_danger: 3,
        effect: ItemEffect::StonePouch {
            min: STONE_POUCH_MIN * 5,
            max: STONE_POUCH_MAX * 5,
        },
        stackable: true,
    },
    ItemDef {
        id: ItemId::FoundationPill,
        name: "Foundation Pill",
        rarity: Rarity::Uncommon,
        min_danger: 1,
        effect: ItemEffect::BreakthroughAid { bonus: 0.10 },
        stackable: true,
    },
    ItemDef {
        id: ItemId::NinePetalPill,
        name: "Nine Petal Pill",
        rarity: Rarity::Epic,
        min_danger: 3,
        effect: ItemEffect::BreakthroughAid { bonus: 0.25 },
        stackable: true,
    },
    ItemDef {
        id: ItemId::ClarityElixir,
        name: "Clarity Elixir",
        rarity: Rarity::Rare,
        min_danger: 1,
        effect: ItemEffect::CureDeviation,
        stackable: true,
    },
    ItemDef {
        id: ItemId::ThunderwardTalisman,
        name: "Thunderward Talisman",
        rarity: Rarity::Epic,
        min_danger: 2,
        effect: ItemEffect::TribulationResist { fraction: 0.25 },
        stackable: false,
    },
    ItemDef {
        id: ItemId::AzureSwordScripture,
        name: "Azure Sword Scripture",
        rarity: Rarity::Rare,
        min_danger: 2,
        effect: ItemEffect::Scripture {
            speed_multiplier: 1.25,
        },
        stackable: false,
    },
    ItemDef {
        id: ItemId::CrimsonFurnaceManual,
        name: "Crimson Furnace Manual",
        rarity: Rarity::Epic,
        min_danger: 4,
        effect: ItemEffect::Scripture {
            speed_multiplier: 1.5,
        },
        stackable: false,
    },
    ItemDef {
        id: ItemId::FateAnchor,
        name: "Fate Anchor",
        rarity: Rarity::Legendary,
        min_danger: 4,
        effect: ItemEffect::FateAnchor,
        stackable: false,
    },
    ItemDef {
        id: ItemId::DimensionalRing,
        name: "Dimensional Ring",
        rarity: Rarity::Legendary,
        min_danger: 5,
        effect: ItemEffect::DimensionalRing,
        stackable: false,
    },
];
