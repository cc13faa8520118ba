//! The per-second tick: the single authoritative state transition.
//!
//! `tick()` advances travel, buffs, qi deviation, XP accrual, exploration,
//! and path unlocks, returning a [`TickResult`] describing what happened so
//! the presentation layer can react without game logic depending on any UI
//! types.

use super::constants::{
    BASE_XP_PER_TICK, BEAST_TAMING_UNLOCK_CHANCE, BEAST_TAMING_UNLOCK_LUCK_FACTOR,
    CLICK_BOOST_FACTOR, DEVIL_KARMA_THRESHOLD, EVENT_DRAW_INTERVAL_TICKS, KARMA_VISIBLE_LEVEL,
    QI_DEVIATION_XP_FACTOR, TALISMAN_UNLOCK_CHANCE,
};
use super::game_state::{Action, GamePhase, GameState};
use crate::cultivation::paths::{all_paths, get_path, PathId};
use crate::cultivation::progression::PathProgress;
use crate::items::{get_item, ItemId, Rarity};
use crate::utils::rng::percent_check;
use crate::world::events::EventId;
use crate::world::exploration::{
    draw_region_event, try_fated_event, try_loot, try_stone_trickle, LootFind,
};
use crate::world::regions::{get_region, RegionId};
use rand::Rng;

/// A single event produced by a game tick. The presentation layer maps
/// these to narration and UI state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Travel finished; the character arrived at the destination.
    TravelCompleted { region: RegionId },

    /// A timed buff ran out.
    BuffExpired { name: String },

    /// Qi deviation cleared on its own.
    QiDeviationEnded,

    /// The active path hit its XP requirement this tick.
    BreakthroughReady { path: PathId },

    /// Small spirit-stone trickle while exploring.
    StonesFound { amount: u64 },

    /// An item was looted and added to the inventory.
    ItemFound { item: ItemId, rarity: Rarity },

    /// A stone pouch was looted and opened on the spot.
    PouchOpened { source: ItemId, stones: u64 },

    /// A fated encounter fired; the pending-event slot is now occupied.
    FatedEncounter { event: EventId },

    /// A scheduled region event fired; the pending-event slot is occupied.
    EventTriggered { event: EventId },

    /// Karma became permanently visible.
    KarmaRevealed,

    /// A path unlocked this tick.
    PathUnlocked { path: PathId },

    /// Karma fell past the devil threshold; the mark is permanent.
    DevilMarkGained,
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,
}

/// Processes a single one-second game tick.
///
/// Total over all reachable states: never fails, never panics. Pass
/// `&mut rand::thread_rng()` in production or a seeded
/// `rand_chacha::ChaCha8Rng` in tests.
pub fn tick<R: Rng>(state: &mut GameState, click_boosted: bool, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();

    // Only a playing character advances; a dead one waits for rebirth.
    if state.phase != GamePhase::Playing {
        return result;
    }

    // ── 1. Counters ─────────────────────────────────────────────
    state.tick_count += 1;
    state.play_time_seconds += 1;

    // ── 2. Travel (exclusive with everything else) ──────────────
    if state.travel.traveling {
        state.travel.remaining_seconds -= 1;
        if state.travel.remaining_seconds <= 0 {
            complete_travel(state, &mut result);
        }
        return result;
    }

    // ── 3. Buffs ────────────────────────────────────────────────
    for buff in &mut state.buffs {
        buff.remaining_seconds -= 1;
    }
    let expired: Vec<String> = state
        .buffs
        .iter()
        .filter(|b| b.remaining_seconds <= 0)
        .map(|b| b.name.clone())
        .collect();
    state.buffs.retain(|b| b.remaining_seconds > 0);
    for name in expired {
        state.push_log(format!("The effect of {name} fades."));
        result.events.push(TickEvent::BuffExpired { name });
    }

    // ── 4. Qi deviation ─────────────────────────────────────────
    if state.qi_deviation.active {
        state.qi_deviation.remaining_seconds -= 1;
        if state.qi_deviation.remaining_seconds <= 0 {
            state.qi_deviation = Default::default();
            state.push_log("Your qi settles; the deviation has passed.");
            result.events.push(TickEvent::QiDeviationEnded);
        }
    }

    // ── 5. XP accrual ───────────────────────────────────────────
    apply_xp_accrual(state, click_boosted, &mut result);

    // ── 6. Exploration ──────────────────────────────────────────
    if state.action == Action::Explore {
        resolve_exploration_tick(state, rng, &mut result);
    }

    // ── 7. Karma visibility ─────────────────────────────────────
    if !state.karma_visible
        && state
            .paths
            .values()
            .any(|p| p.unlocked && p.level >= KARMA_VISIBLE_LEVEL)
    {
        state.karma_visible = true;
        state.push_log("You begin to sense the weight of your deeds.");
        result.events.push(TickEvent::KarmaRevealed);
    }

    // ── 8. Highest-level tracking ───────────────────────────────
    state.recompute_highest_level();

    // ── 9. Path unlock checks ───────────────────────────────────
    run_unlock_checks(state, rng, &mut result);

    result
}

/// XP gain per tick before buffs and the click boost, shared with the
/// offline calculator so both stay consistent.
pub fn xp_rate(state: &GameState, path_id: PathId) -> f64 {
    let speed = (get_path(path_id).speed)(state);
    let deviation_factor = if state.qi_deviation.active {
        QI_DEVIATION_XP_FACTOR
    } else {
        1.0
    };
    BASE_XP_PER_TICK * speed * deviation_factor * (1.0 + state.character.legacy_bonus)
}

fn apply_xp_accrual(state: &mut GameState, click_boosted: bool, result: &mut TickResult) {
    // Explore never grants path XP, and idle grants nothing.
    if matches!(state.action, Action::Idle | Action::Explore) {
        return;
    }
    let Some(path_id) = state.active_path else {
        return;
    };
    let Some(progress) = state.paths.get(&path_id) else {
        return;
    };
    if !progress.unlocked || progress.breakthrough_ready || progress.is_max_level() {
        return;
    }
    // Action/category mismatch yields zero XP silently.
    if get_path(path_id).action != state.action {
        return;
    }

    let click_factor = if click_boosted { CLICK_BOOST_FACTOR } else { 1.0 };
    let gain = xp_rate(state, path_id) * state.buff_multiplier() * click_factor;

    let progress = state.paths.get_mut(&path_id).expect("checked above");
    progress.grant_xp(gain);
    if progress.breakthrough_ready {
        let name = get_path(path_id).name;
        state.push_log(format!("{name} is ready for a breakthrough!"));
        result.events.push(TickEvent::BreakthroughReady { path: path_id });
    }
}

fn resolve_exploration_tick<R: Rng>(state: &mut GameState, rng: &mut R, result: &mut TickResult) {
    // (a) stone trickle
    if let Some(amount) = try_stone_trickle(rng) {
        state.add_stones(amount);
        result.events.push(TickEvent::StonesFound { amount });
    }

    // (b) loot discovery
    match try_loot(state, rng) {
        Some(LootFind::Stones { source, amount }) => {
            state.add_stones(amount);
            let name = get_item(source).name;
            state.push_log(format!("You find a {name} holding {amount} spirit stones."));
            result.events.push(TickEvent::PouchOpened {
                source,
                stones: amount,
            });
        }
        Some(LootFind::Item(item)) => {
            state.add_item(item, 1);
            let def = get_item(item);
            state.push_log(format!("You find: {} [{}]", def.name, def.rarity.label()));
            result.events.push(TickEvent::ItemFound {
                item,
                rarity: def.rarity,
            });
        }
        None => {}
    }

    // (c) fated encounter, gated on an empty pending slot
    if state.pending_event.is_none() {
        if let Some(event) = try_fated_event(state, rng) {
            state.pending_event = Some(event);
            state.push_log("Fate stirs around you...");
            result.events.push(TickEvent::FatedEncounter { event });
        }
    }

    // Scheduled region event on a fixed cadence, also gated on the slot.
    if state.pending_event.is_none() && state.tick_count % EVENT_DRAW_INTERVAL_TICKS == 0 {
        if let Some(event) = draw_region_event(state, rng) {
            state.pending_event = Some(event);
            result.events.push(TickEvent::EventTriggered { event });
        }
    }
}

fn complete_travel(state: &mut GameState, result: &mut TickResult) {
    let Some(destination) = state.travel.destination else {
        // Malformed travel state: recover by clearing it.
        state.travel = Default::default();
        return;
    };
    state.location = destination;
    state.discovered_regions.insert(destination);
    for neighbor in get_region(destination).connections {
        state.discovered_regions.insert(*neighbor);
    }
    state.travel = Default::default();
    let name = get_region(destination).name;
    state.push_log(format!("You arrive at {name}."));
    result.events.push(TickEvent::TravelCompleted {
        region: destination,
    });
}

/// Unlocks a path if it is not already present. Idempotent: existing
/// entries are never re-rolled or reset.
fn unlock_path(state: &mut GameState, id: PathId, result: &mut TickResult) {
    if state.paths.contains_key(&id) {
        return;
    }
    state.paths.insert(id, PathProgress::new());
    let name = get_path(id).name;
    state.push_log(format!("A new path opens before you: {name}."));
    result.events.push(TickEvent::PathUnlocked { path: id });
}

fn run_unlock_checks<R: Rng>(state: &mut GameState, rng: &mut R, result: &mut TickResult) {
    // Table predicates, evaluated over all paths.
    for def in all_paths() {
        if !state.paths.contains_key(&def.id) && (def.unlock)(state) {
            unlock_path(state, def.id, result);
        }
    }

    // Beast taming: luck-scaled roll while exploring the Beast Wilds.
    if !state.paths.contains_key(&PathId::BeastTaming)
        && state.action == Action::Explore
        && state.location == RegionId::BeastWilds
    {
        let chance = BEAST_TAMING_UNLOCK_CHANCE
            + state.character.luck * BEAST_TAMING_UNLOCK_LUCK_FACTOR;
        if percent_check(rng, chance) {
            unlock_path(state, PathId::BeastTaming, result);
        }
    }

    // Talisman crafting: rare insight while cultivating, any path.
    if !state.paths.contains_key(&PathId::TalismanCrafting)
        && state.action == Action::Cultivate
        && percent_check(rng, TALISMAN_UNLOCK_CHANCE)
    {
        unlock_path(state, PathId::TalismanCrafting, result);
    }

    // Heretic arts: gated on the rogue flag plus falling karma.
    if !state.paths.contains_key(&PathId::HereticArts)
        && state.character.rogue
        && state.character.karma <= -30
    {
        unlock_path(state, PathId::HereticArts, result);
    }

    // Devil threshold: unlocks both devil paths and marks the soul.
    if state.character.karma <= DEVIL_KARMA_THRESHOLD {
        let already_marked = state.character.devil_marked;
        unlock_path(state, PathId::DevilHeart, result);
        unlock_path(state, PathId::BloodRefining, result);
        if !already_marked {
            state.character.devil_marked = true;
            state.push_log("A cold brand sears itself into your soul.");
            result.events.push(TickEvent::DevilMarkGained);
        }
    }
}
