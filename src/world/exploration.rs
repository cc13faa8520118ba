//! Exploration resolution: stone trickle, loot draws, and event rolls.
//!
//! These helpers only read state and draw randomness; the tick engine
//! applies their results so every mutation stays in one place.

use super::events::{fated_events, EventId};
use super::regions::get_region;
use crate::character::traits::Character;
use crate::core::constants::{
    EXPLORE_LOOT_BASE_CHANCE, EXPLORE_LOOT_LUCK_FACTOR, EXPLORE_LOOT_ROGUE_BONUS,
    EXPLORE_STONE_TRICKLE_CHANCE, EXPLORE_STONE_TRICKLE_MAX, EXPLORE_STONE_TRICKLE_MIN,
    FATED_ENCOUNTER_BASE_CHANCE, FATED_ENCOUNTER_LUCK_FACTOR,
};
use crate::core::game_state::GameState;
use crate::items::{get_item, ItemEffect, ItemId};
use crate::utils::rng::{percent_check, weighted_pick};
use rand::Rng;

/// One loot draw result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootFind {
    /// A pouch resolved into spirit stones; carries the source item id.
    Stones { source: ItemId, amount: u64 },
    Item(ItemId),
}

/// Per-tick loot discovery chance for this character.
pub fn loot_chance(character: &Character) -> f64 {
    let mut chance = EXPLORE_LOOT_BASE_CHANCE
        + character.luck * EXPLORE_LOOT_LUCK_FACTOR
        + character.background.loot_chance_bonus();
    if character.rogue {
        chance += EXPLORE_LOOT_ROGUE_BONUS;
    }
    chance
}

/// Low-probability small spirit-stone award.
pub fn try_stone_trickle<R: Rng>(rng: &mut R) -> Option<u64> {
    if percent_check(rng, EXPLORE_STONE_TRICKLE_CHANCE) {
        Some(rng.gen_range(EXPLORE_STONE_TRICKLE_MIN..=EXPLORE_STONE_TRICKLE_MAX))
    } else {
        None
    }
}

/// Rolls loot discovery against the current region's weighted table,
/// filtered to entries whose min-danger threshold the region meets.
pub fn try_loot<R: Rng>(state: &GameState, rng: &mut R) -> Option<LootFind> {
    if !percent_check(rng, loot_chance(&state.character)) {
        return None;
    }

    let region = get_region(state.location);
    let eligible: Vec<_> = region
        .loot
        .iter()
        .filter(|entry| get_item(entry.item).min_danger <= region.danger)
        .collect();
    let entry = weighted_pick(rng, &eligible, |e| e.weight)?;

    match get_item(entry.item).effect {
        ItemEffect::StonePouch { min, max } => Some(LootFind::Stones {
            source: entry.item,
            amount: rng.gen_range(min..=max),
        }),
        _ => Some(LootFind::Item(entry.item)),
    }
}

/// Very-low-probability fated encounter, scaled by luck. Prefers fated
/// events whose pool includes the current region, falling back to any
/// fated event.
pub fn try_fated_event<R: Rng>(state: &GameState, rng: &mut R) -> Option<EventId> {
    let chance =
        FATED_ENCOUNTER_BASE_CHANCE + state.character.luck * FATED_ENCOUNTER_LUCK_FACTOR;
    if !percent_check(rng, chance) {
        return None;
    }

    let local: Vec<_> = fated_events()
        .filter(|def| def.regions.contains(&state.location))
        .collect();
    let pool: Vec<_> = if local.is_empty() {
        fated_events().collect()
    } else {
        local
    };
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())].id)
}

/// Uniform draw from the current region's event pool.
pub fn draw_region_event<R: Rng>(state: &GameState, rng: &mut R) -> Option<EventId> {
    let pool = get_region(state.location).events;
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())])
}
