//! Offline catch-up: re-derives the effect of elapsed wall-clock time in
//! closed form instead of replaying individual ticks.
//!
//! Runs once at session start, before the live scheduler takes over. The
//! result must agree with the tick engine in the limit of small spans,
//! under the simplifying assumption of no intervening random events, buff
//! changes, or action switches. Buff multipliers are deliberately excluded
//! from the XP formula: buffs are treated as expired for any offline span.

use super::constants::{
    MAX_OFFLINE_SECONDS, MIN_OFFLINE_SECONDS, OFFLINE_STONES_PER_INTERVAL,
    OFFLINE_STONE_INTERVAL_SECONDS,
};
use super::game_state::{Action, GamePhase, GameState};
use super::tick::xp_rate;
use crate::cultivation::paths::get_path;
use crate::world::regions::get_region;

/// Report of offline progression results.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    /// Seconds actually credited after the cap.
    pub credited_seconds: i64,
    pub xp_gained: f64,
    pub stones_granted: u64,
    pub breakthrough_ready: bool,
    pub travel_completed: bool,
    pub buffs_expired: usize,
    pub deviation_cleared: bool,
}

/// Applies up to eight hours of offline progress to `state`.
///
/// A span under five seconds, or a state that is no longer in the playing
/// phase, is a complete no-op: no mutation, not even the save timestamp.
pub fn catch_up(state: &mut GameState, now_timestamp: i64) -> OfflineReport {
    let elapsed = now_timestamp - state.last_save_time;
    if state.phase != GamePhase::Playing || elapsed < MIN_OFFLINE_SECONDS {
        return OfflineReport::default();
    }
    let credited = elapsed.min(MAX_OFFLINE_SECONDS);

    let mut report = OfflineReport {
        elapsed_seconds: elapsed,
        credited_seconds: credited,
        ..Default::default()
    };

    // Travel resolves first. Live ticks spent traveling do nothing else,
    // so only the post-arrival remainder counts toward XP, buffs, and
    // deviation below.
    let mut travel_seconds = 0;
    if state.travel.traveling {
        travel_seconds = state.travel.remaining_seconds.min(credited);
        state.travel.remaining_seconds -= credited;
        if state.travel.remaining_seconds <= 0 {
            if let Some(destination) = state.travel.destination {
                state.location = destination;
                state.discovered_regions.insert(destination);
                for neighbor in get_region(destination).connections {
                    state.discovered_regions.insert(*neighbor);
                }
                report.travel_completed = true;
            }
            state.travel = Default::default();
        }
    }
    let active = credited - travel_seconds;

    // XP, under the same eligibility rules as the live tick.
    if active > 0 && !matches!(state.action, Action::Idle | Action::Explore) {
        if let Some(path_id) = state.active_path {
            let eligible = state
                .paths
                .get(&path_id)
                .map(|p| {
                    p.unlocked
                        && !p.breakthrough_ready
                        && !p.is_max_level()
                        && get_path(path_id).action == state.action
                })
                .unwrap_or(false);
            if eligible {
                let gain = xp_rate(state, path_id) * active as f64;
                let progress = state.paths.get_mut(&path_id).expect("checked above");
                let before = progress.current_xp;
                progress.grant_xp(gain);
                report.xp_gained = progress.current_xp - before;
                report.breakthrough_ready = progress.breakthrough_ready;
            }
        }
    }

    // Qi deviation runs down over the non-travel seconds.
    if state.qi_deviation.active && active > 0 {
        state.qi_deviation.remaining_seconds -= active;
        if state.qi_deviation.remaining_seconds <= 0 {
            state.qi_deviation = Default::default();
            report.deviation_cleared = true;
        }
    }

    // Buffs: same decrement-and-filter rule as the live tick.
    if active > 0 {
        for buff in &mut state.buffs {
            buff.remaining_seconds -= active;
        }
        let before = state.buffs.len();
        state.buffs.retain(|b| b.remaining_seconds > 0);
        report.buffs_expired = before - state.buffs.len();
    }

    // Flat stone trickle proportional to time away.
    let stones =
        (credited / OFFLINE_STONE_INTERVAL_SECONDS) as u64 * OFFLINE_STONES_PER_INTERVAL;
    if stones > 0 {
        state.add_stones(stones);
        report.stones_granted = stones;
    }

    state.last_save_time = now_timestamp;
    if report.credited_seconds > 0 {
        let minutes = report.credited_seconds / 60;
        state.push_log(format!("You return after {minutes} minutes away."));
    }
    report
}
