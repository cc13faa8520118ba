//! Static region graph: danger levels, connectivity, loot tables, event pools.

use super::events::EventId;
use crate::items::ItemId;
use serde::{Deserialize, Serialize};

/// Static region identifiers. Ids are stable across saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegionId {
    AzureValley,
    VerdantForest,
    BeastWilds,
    AshenWastes,
    SkyMountains,
    DemonRavine,
}

/// One weighted loot-table entry. The item's own `min_danger` still gates it.
#[derive(Debug, Clone, Copy)]
pub struct LootEntry {
    pub item: ItemId,
    pub weight: f64,
}

/// Static region definition.
#[derive(Debug, Clone)]
pub struct RegionDef {
    pub id: RegionId,
    pub name: &'static str,
    pub danger: u32,
    /// Undirected adjacency; every listed neighbor lists this region back.
    pub connections: &'static [RegionId],
    pub loot: &'static [LootEntry],
    pub events: &'static [EventId],
}

pub fn all_regions() -> &'static [RegionDef] {
    &REGIONS
}

pub fn get_region(id: RegionId) -> &'static RegionDef {
    REGIONS
        .iter()
        .find(|def| def.id == id)
        .expect("every RegionId has a table entry")
}

/// The region every new character starts in.
pub const STARTING_REGION: RegionId = RegionId::AzureValley;

static REGIONS: [RegionDef; 6] = [
    RegionDef {
        id: RegionId::AzureValley,
        name: "Azure Valley",
        danger: 0,
        connections: &[RegionId::VerdantForest, RegionId::SkyMountains],
        loot: &[
            LootEntry { item: ItemId::SpiritHerb, weight: 50.0 },
            LootEntry { item: ItemId::StonePouch, weight: 30.0 },
            LootEntry { item: ItemId::FoundationPill, weight: 8.0 },
            LootEntry { item: ItemId::ClarityElixir, weight: 4.0 },
        ],
        events: &[EventId::WanderingHerbalist, EventId::MerchantCaravan],
    },
    RegionDef {
        id: RegionId::VerdantForest,
        name: "Verdant Forest",
        danger: 1,
        connections: &[RegionId::AzureValley, RegionId::BeastWilds],
        loot: &[
            LootEntry { item: ItemId::SpiritHerb, weight: 45.0 },
            LootEntry { item: ItemId::StonePouch, weight: 25.0 },
            LootEntry { item: ItemId::FoundationPill, weight: 12.0 },
            LootEntry { item: ItemId::ClarityElixir, weight: 6.0 },
        ],
        events: &[EventId::WanderingHerbalist, EventId::WoundedBeast],
    },
    RegionDef {
        id: RegionId::BeastWilds,
        name: "Beast Wilds",
        danger: 2,
        connections: &[RegionId::VerdantForest, RegionId::AshenWastes],
        loot: &[
            LootEntry { item: ItemId::BeastCore, weight: 35.0 },
            LootEntry { item: ItemId::SpiritHerb, weight: 25.0 },
            LootEntry { item: ItemId::StonePouch, weight: 20.0 },
            LootEntry { item: ItemId::ThunderwardTalisman, weight: 3.0 },
            LootEntry { item: ItemId::AzureSwordScripture, weight: 3.0 },
        ],
        events: &[EventId::WoundedBeast, EventId::MerchantCaravan],
    },
    RegionDef {
        id: RegionId::AshenWastes,
        name: "Ashen Wastes",
        danger: 3,
        connections: &[RegionId::BeastWilds, RegionId::SkyMountains, RegionId::DemonRavine],
        loot: &[
            LootEntry { item: ItemId::BeastCore, weight: 25.0 },
            LootEntry { item: ItemId::GrandStonePouch, weight: 15.0 },
            LootEntry { item: ItemId::NinePetalPill, weight: 6.0 },
            LootEntry { item: ItemId::ThunderwardTalisman, weight: 4.0 },
        ],
        events: &[EventId::BanditAmbush, EventId::CollapsedShrine],
    },
    RegionDef {
        id: RegionId::SkyMountains,
        name: "Sky Mountains",
        danger: 4,
        connections: &[RegionId::AzureValley, RegionId::AshenWastes],
        loot: &[
            LootEntry { item: ItemId::GrandStonePouch, weight: 20.0 },
            LootEntry { item: ItemId::NinePetalPill, weight: 10.0 },
            LootEntry { item: ItemId::CrimsonFurnaceManual, weight: 4.0 },
            LootEntry { item: ItemId::FateAnchor, weight: 1.0 },
        ],
        events: &[EventId::CollapsedShrine, EventId::MerchantCaravan],
    },
    RegionDef {
        id: RegionId::DemonRavine,
        name: "Demon Ravine",
        danger: 5,
        connections: &[RegionId::AshenWastes],
        loot: &[
            LootEntry { item: ItemId::GrandStonePouch, weight: 18.0 },
            LootEntry { item: ItemId::NinePetalPill, weight: 12.0 },
            LootEntry { item: ItemId::CrimsonFurnaceManual, weight: 6.0 },
            LootEntry { item: ItemId::DimensionalRing, weight: 1.0 },
        ],
        events: &[EventId::BanditAmbush],
    },
];
