use serde::{Deserialize, Serialize};

/// Item rarity tiers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }
}

/// Static item identifiers. Ids are stable across saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    SpiritHerb,
    BeastCore,
    StonePouch,
    GrandStonePouch,
    FoundationPill,
    NinePetalPill,
    ClarityElixir,
    ThunderwardTalisman,
    AzureSwordScripture,
    CrimsonFurnaceManual,
    FateAnchor,
    DimensionalRing,
}

/// Effect payload attached to an item definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    /// Timed multiplicative XP buff when used.
    XpBoost { multiplier: f64, duration_seconds: i64 },
    /// Arms a bonus consumed by the next breakthrough attempt.
    BreakthroughAid { bonus: f64 },
    /// Clears an active qi deviation.
    CureDeviation,
    /// Grants spirit stones instead of an inventory slot when looted.
    StonePouch { min: u64, max: u64 },
    /// Expands the tribulation health pool while held.
    TribulationResist { fraction: f64 },
    /// Multiplies a path's cultivation speed while held.
    Scripture { speed_multiplier: f64 },
    /// Preserves trait rolls across rebirth while held.
    FateAnchor,
    /// Preserves inventory (minus the ring) across rebirth while held.
    DimensionalRing,
    /// No mechanical effect; crafting or trade material.
    Material,
}

/// Static item definition.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: &'static str,
    pub rarity: Rarity,
    /// Minimum region danger for this item to appear in loot tables.
    pub min_danger: u32,
    pub effect: ItemEffect,
    pub stackable: bool,
}

/// An owned inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub count: u32,
}
