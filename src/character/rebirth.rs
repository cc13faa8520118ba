//! Rebirth: death is a soft reset that feeds the legacy loop.

use crate::core::constants::LEGACY_BONUS_PER_LEVEL;
use crate::core::game_state::{GamePhase, GameState};
use crate::items::ItemId;
use rand::Rng;

use super::traits::Character;

/// Summary of what carried over through a rebirth.
#[derive(Debug, Clone, PartialEq)]
pub struct RebirthReport {
    pub rebirth_count: u32,
    pub legacy_bonus: f64,
    pub traits_preserved: bool,
    pub inventory_preserved: bool,
}

/// Consumes the dead incarnation and returns the next one.
///
/// Legacy bonus accrues from the highest level ever reached and never
/// decreases. A Fate Anchor preserves the rolled traits; a Dimensional
/// Ring preserves the inventory (minus the ring itself). Both relics are
/// consumed in the process.
pub fn rebirth<R: Rng>(state: GameState, now_timestamp: i64, rng: &mut R) -> (GameState, RebirthReport) {
    let has_anchor = state.has_item(ItemId::FateAnchor);
    let has_ring = state.has_item(ItemId::DimensionalRing);

    let mut character = if has_anchor {
        let mut c = state.character.clone();
        c.karma = 0;
        c.rogue = false;
        c.redeemed_devil = false;
        c
    } else {
        let mut c = Character::roll(rng);
        c.devil_marked = state.character.devil_marked;
        c
    };
    character.rebirth_count = state.character.rebirth_count + 1;
    character.total_deaths = state.character.total_deaths + 1;
    character.legacy_bonus = state.character.legacy_bonus
        + state.highest_level as f64 * LEGACY_BONUS_PER_LEVEL;

    let report = RebirthReport {
        rebirth_count: character.rebirth_count,
        legacy_bonus: character.legacy_bonus,
        traits_preserved: has_anchor,
        inventory_preserved: has_ring,
    };

    let name = state.character_name.clone();
    let mut next = GameState::from_character(name, character, now_timestamp);
    if has_ring {
        next.inventory = state.inventory;
        next.remove_item(ItemId::DimensionalRing);
    }
    if has_anchor {
        // The anchor itself does not survive, even when a ring carried it over.
        next.remove_item(ItemId::FateAnchor);
    }
    next.phase = GamePhase::Playing;
    next.push_log(format!(
        "Your soul returns to the wheel. Rebirth {} begins.",
        report.rebirth_count
    ));

    (next, report)
}
