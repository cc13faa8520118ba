//! Player commands: discrete actions the presentation layer invokes
//! between ticks. Every command validates against the current state and
//! returns a structured outcome instead of panicking on bad input.

use super::constants::{
    BOOST_COST_STONES, BOOST_DURATION_SECONDS, BOOST_XP_MULTIPLIER, TRAVEL_BASE_SECONDS,
    TRAVEL_SECONDS_PER_DANGER,
};
use super::game_state::{Action, ActiveBuff, GamePhase, GameState};
use crate::cultivation::breakthrough::{attempt_breakthrough, BreakthroughOutcome};
use crate::cultivation::paths::{get_path, PathId};
use crate::cultivation::progression::is_tier_boundary;
use crate::cultivation::tribulation::{Tribulation, TribulationStatus};
use crate::items::{get_item, ItemEffect, ItemId};
use crate::world::events::{get_event, EventId};
use crate::world::regions::{get_region, RegionId};
use rand::Rng;

/// Why a command was rejected. Commands never partially apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("not available while dead")]
    Dead,
    #[error("cannot do that while traveling")]
    Traveling,
    #[error("cannot do that during a tribulation")]
    TribulationInProgress,
    #[error("no route from the current region to {0:?}")]
    NotConnected(RegionId),
    #[error("already in that region")]
    AlreadyThere,
    #[error("path {0:?} is not unlocked")]
    PathLocked(PathId),
    #[error("not enough spirit stones (need {needed})")]
    InsufficientStones { needed: u64 },
    #[error("item not in inventory")]
    MissingItem,
    #[error("that item cannot be used directly")]
    NotUsable,
    #[error("no qi deviation to cure")]
    NoDeviation,
    #[error("no event is waiting")]
    NoPendingEvent,
    #[error("event has no option {0}")]
    BadOption(usize),
    #[error("no tribulation in progress")]
    NoTribulation,
}

/// Outcome of a breakthrough command. Tier boundaries route into a
/// tribulation instead of resolving immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakthroughCommand {
    Resolved(BreakthroughOutcome),
    TribulationStarted { strikes_required: u32 },
}

fn require_alive(state: &GameState) -> Result<(), CommandError> {
    if state.phase == GamePhase::Dead {
        return Err(CommandError::Dead);
    }
    Ok(())
}

/// Switches the current action. Switching away from a path's action does
/// not forget the path; its progress simply stops accruing.
pub fn set_action(state: &mut GameState, action: Action) -> Result<(), CommandError> {
    require_alive(state)?;
    if state.tribulation.as_ref().is_some_and(|t| t.is_active()) {
        return Err(CommandError::TribulationInProgress);
    }
    state.action = action;
    Ok(())
}

/// Selects which unlocked path receives XP.
pub fn set_active_path(state: &mut GameState, path: PathId) -> Result<(), CommandError> {
    require_alive(state)?;
    let unlocked = state.paths.get(&path).map(|p| p.unlocked).unwrap_or(false);
    if !unlocked {
        return Err(CommandError::PathLocked(path));
    }
    state.active_path = Some(path);
    Ok(())
}

/// Begins travel to a connected region. Travel time scales with the
/// destination's danger rating.
pub fn travel_to(state: &mut GameState, destination: RegionId) -> Result<i64, CommandError> {
    require_alive(state)?;
    if state.travel.traveling {
        return Err(CommandError::Traveling);
    }
    if state.tribulation.as_ref().is_some_and(|t| t.is_active()) {
        return Err(CommandError::TribulationInProgress);
    }
    if destination == state.location {
        return Err(CommandError::AlreadyThere);
    }
    let here = get_region(state.location);
    if !here.connections.contains(&destination) {
        return Err(CommandError::NotConnected(destination));
    }

    let dest = get_region(destination);
    let seconds = TRAVEL_BASE_SECONDS + dest.danger as i64 * TRAVEL_SECONDS_PER_DANGER;
    state.travel.traveling = true;
    state.travel.destination = Some(destination);
    state.travel.remaining_seconds = seconds;
    state.push_log(format!("You set out for {}.", dest.name));
    Ok(seconds)
}

/// Spends stones on a temporary cultivation boost. Buying again while one
/// is running stacks a second buff rather than extending the first.
pub fn buy_boost(state: &mut GameState) -> Result<(), CommandError> {
    require_alive(state)?;
    if !state.spend_stones(BOOST_COST_STONES) {
        return Err(CommandError::InsufficientStones {
            needed: BOOST_COST_STONES,
        });
    }
    state.buffs.push(ActiveBuff {
        name: "Incense of Clarity".to_string(),
        multiplier: BOOST_XP_MULTIPLIER,
        remaining_seconds: BOOST_DURATION_SECONDS,
    });
    state.push_log("Incense smoke sharpens your focus.");
    Ok(())
}

/// Uses a consumable from the inventory. Held relics (scriptures, the
/// anchor, the ring, talismans) act passively and are rejected here.
pub fn use_item(state: &mut GameState, id: ItemId) -> Result<(), CommandError> {
    require_alive(state)?;
    if !state.has_item(id) {
        return Err(CommandError::MissingItem);
    }
    let def = get_item(id);
    match def.effect {
        ItemEffect::XpBoost {
            multiplier,
            duration_seconds,
        } => {
            state.buffs.push(ActiveBuff {
                name: def.name.to_string(),
                multiplier,
                remaining_seconds: duration_seconds,
            });
        }
        ItemEffect::BreakthroughAid { bonus } => {
            // A stronger pill replaces a weaker armed one; stacking would
            // trivialize late breakthroughs.
            state.pending_pill_bonus = state.pending_pill_bonus.max(bonus);
        }
        ItemEffect::CureDeviation => {
            if !state.qi_deviation.active {
                return Err(CommandError::NoDeviation);
            }
            state.qi_deviation = Default::default();
            state.push_log("The elixir settles your rebellious qi.");
        }
        _ => return Err(CommandError::NotUsable),
    }
    state.remove_item(id);
    Ok(())
}

/// Attempts a breakthrough on the active path, consuming any armed pill
/// bonus. At tier boundaries this starts a tribulation instead; the
/// attempt resolves when the tribulation ends.
pub fn command_breakthrough<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
) -> Result<BreakthroughCommand, CommandError> {
    require_alive(state)?;
    if state.tribulation.as_ref().is_some_and(|t| t.is_active()) {
        return Err(CommandError::TribulationInProgress);
    }

    let boundary = state
        .active_path
        .and_then(|id| state.paths.get(&id).map(|p| (id, p)))
        .filter(|(_, p)| p.unlocked && p.breakthrough_ready && !p.is_max_level())
        .filter(|(_, p)| is_tier_boundary(p.level))
        .map(|(id, p)| (id, p.level));

    if let Some((path, level)) = boundary {
        let resist = tribulation_resist(state);
        let trib = Tribulation::begin(
            path,
            level,
            state.character.devil_marked,
            state.character.body_multiplier,
            resist,
        );
        let strikes_required = trib.strikes_required;
        state.tribulation = Some(trib);
        state.push_log("Thunderclouds gather. The heavens take notice.");
        return Ok(BreakthroughCommand::TribulationStarted { strikes_required });
    }

    let pill = std::mem::take(&mut state.pending_pill_bonus);
    let outcome = attempt_breakthrough(state, pill, rng);
    if outcome == BreakthroughOutcome::NotReady {
        // Nothing was consumed by a refused attempt.
        state.pending_pill_bonus = pill;
    }
    apply_breakthrough_narration(state, &outcome);
    Ok(BreakthroughCommand::Resolved(outcome))
}

/// Player resisted the current strike in time.
pub fn tribulation_resist_strike(
    state: &mut GameState,
) -> Result<TribulationStatus, CommandError> {
    require_alive(state)?;
    let Some(trib) = state.tribulation.as_mut() else {
        return Err(CommandError::NoTribulation);
    };
    let status = trib.resist_strike();
    finish_tribulation(state, status);
    Ok(status)
}

/// Player missed the strike window.
pub fn tribulation_fail_strike(
    state: &mut GameState,
) -> Result<TribulationStatus, CommandError> {
    require_alive(state)?;
    let Some(trib) = state.tribulation.as_mut() else {
        return Err(CommandError::NoTribulation);
    };
    let status = trib.fail_strike();
    finish_tribulation(state, status);
    Ok(status)
}

/// Applies a terminal tribulation status: survival advances the path
/// past the tier boundary, failure kills the incarnation.
fn finish_tribulation(state: &mut GameState, status: TribulationStatus) {
    match status {
        TribulationStatus::Active => {}
        TribulationStatus::Survived => {
            let path = state.tribulation.as_ref().map(|t| t.path);
            state.tribulation = None;
            state.pending_pill_bonus = 0.0;
            if let Some(path) = path {
                if let Some(progress) = state.paths.get_mut(&path) {
                    progress.advance_level();
                    let name = get_path(path).name;
                    let level = progress.level;
                    state.push_log(format!(
                        "The clouds part. {name} advances to level {level}."
                    ));
                }
                state.recompute_highest_level();
            }
        }
        TribulationStatus::Failed => {
            state.tribulation = None;
            state.pending_pill_bonus = 0.0;
            state.phase = GamePhase::Dead;
            state.push_log("The final bolt finds its mark. Your body turns to ash.");
        }
    }
}

/// Applies the chosen option of the pending event and clears the slot.
pub fn choose_event_option(state: &mut GameState, index: usize) -> Result<EventId, CommandError> {
    require_alive(state)?;
    let Some(event_id) = state.pending_event else {
        return Err(CommandError::NoPendingEvent);
    };
    let event = get_event(event_id);
    let Some(option) = event.options.get(index) else {
        return Err(CommandError::BadOption(index));
    };

    state.character.add_karma(option.karma_delta);
    state.adjust_stones(option.stone_delta);
    if let Some(item) = option.item_grant {
        state.add_item(item, 1);
        state.push_log(format!("Received: {}.", get_item(item).name));
    }
    state.pending_event = None;
    Ok(event_id)
}

/// Total tribulation resistance from held talismans. One talisman is
/// enough; duplicates do not stack.
fn tribulation_resist(state: &GameState) -> f64 {
    if state.has_item(ItemId::ThunderwardTalisman) {
        match get_item(ItemId::ThunderwardTalisman).effect {
            ItemEffect::TribulationResist { fraction } => fraction,
            _ => 0.0,
        }
    } else {
        0.0
    }
}

fn apply_breakthrough_narration(state: &mut GameState, outcome: &BreakthroughOutcome) {
    match outcome {
        BreakthroughOutcome::NotReady => {}
        BreakthroughOutcome::Success { new_level, terminal } => {
            state.recompute_highest_level();
            if *terminal {
                state.push_log(format!(
                    "Level {new_level}: the path's summit. Nothing above but sky."
                ));
            } else {
                state.push_log(format!("Breakthrough! You reach level {new_level}."));
            }
        }
        BreakthroughOutcome::Death => {
            state.phase = GamePhase::Dead;
            state.push_log("Your meridians rupture. The world goes dark.");
        }
        BreakthroughOutcome::CripplingInjury { new_level } => {
            state.push_log(format!(
                "Your foundation cracks. You fall back to level {new_level}."
            ));
        }
        BreakthroughOutcome::QiDeviation => {
            state.push_log("Qi runs wild through your channels. Progress falters.");
        }
        BreakthroughOutcome::MinorSetback => {
            state.push_log("The bottleneck holds. You withdraw and recover.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::TRIBULATION_STRIKES_TIER_1;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_state() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        GameState::new("Cmd".to_string(), 0, &mut rng)
    }

    fn make_ready(state: &mut GameState, path: PathId, level: u32) {
        let progress = state.paths.get_mut(&path).unwrap();
        progress.level = level;
        progress.xp_required = crate::cultivation::progression::xp_required(level);
        progress.current_xp = progress.xp_required;
        progress.breakthrough_ready = true;
        state.active_path = Some(path);
    }

    #[test]
    fn test_travel_rejects_unconnected_region() {
        let mut state = test_state();
        let err = travel_to(&mut state, RegionId::DemonRavine).unwrap_err();
        assert_eq!(err, CommandError::NotConnected(RegionId::DemonRavine));
        assert!(!state.travel.traveling);
    }

    #[test]
    fn test_travel_time_scales_with_danger() {
        let mut state = test_state();
        let seconds = travel_to(&mut state, RegionId::VerdantForest).unwrap();
        let danger = get_region(RegionId::VerdantForest).danger as i64;
        assert_eq!(seconds, TRAVEL_BASE_SECONDS + danger * TRAVEL_SECONDS_PER_DANGER);
        assert!(state.travel.traveling);

        let err = travel_to(&mut state, RegionId::SkyMountains).unwrap_err();
        assert_eq!(err, CommandError::Traveling);
    }

    #[test]
    fn test_buy_boost_spends_and_stacks() {
        let mut state = test_state();
        state.spirit_stones = BOOST_COST_STONES * 2;
        buy_boost(&mut state).unwrap();
        buy_boost(&mut state).unwrap();
        assert_eq!(state.spirit_stones, 0);
        assert_eq!(state.buffs.len(), 2);
        assert_eq!(
            buy_boost(&mut state).unwrap_err(),
            CommandError::InsufficientStones {
                needed: BOOST_COST_STONES
            }
        );
    }

    #[test]
    fn test_use_pill_arms_bonus_without_stacking() {
        let mut state = test_state();
        state.add_item(ItemId::FoundationPill, 2);
        use_item(&mut state, ItemId::FoundationPill).unwrap();
        use_item(&mut state, ItemId::FoundationPill).unwrap();
        let ItemEffect::BreakthroughAid { bonus } = get_item(ItemId::FoundationPill).effect
        else {
            panic!("foundation pill must be a breakthrough aid");
        };
        assert_eq!(state.pending_pill_bonus, bonus);
        assert!(!state.has_item(ItemId::FoundationPill));
    }

    #[test]
    fn test_use_relic_rejected() {
        let mut state = test_state();
        state.add_item(ItemId::FateAnchor, 1);
        assert_eq!(
            use_item(&mut state, ItemId::FateAnchor).unwrap_err(),
            CommandError::NotUsable
        );
        assert!(state.has_item(ItemId::FateAnchor));
    }

    #[test]
    fn test_cure_without_deviation_keeps_elixir() {
        let mut state = test_state();
        state.add_item(ItemId::ClarityElixir, 1);
        assert_eq!(
            use_item(&mut state, ItemId::ClarityElixir).unwrap_err(),
            CommandError::NoDeviation
        );
        assert!(state.has_item(ItemId::ClarityElixir));

        state.qi_deviation.active = true;
        state.qi_deviation.remaining_seconds = 300;
        use_item(&mut state, ItemId::ClarityElixir).unwrap();
        assert!(!state.qi_deviation.active);
        assert!(!state.has_item(ItemId::ClarityElixir));
    }

    #[test]
    fn test_tier_boundary_starts_tribulation() {
        let mut state = test_state();
        make_ready(&mut state, PathId::QiCultivation, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = command_breakthrough(&mut state, &mut rng).unwrap();
        assert_eq!(
            result,
            BreakthroughCommand::TribulationStarted {
                strikes_required: TRIBULATION_STRIKES_TIER_1
            }
        );
        assert!(state.tribulation.is_some());
        // Level untouched until the tribulation resolves.
        assert_eq!(state.paths[&PathId::QiCultivation].level, 4);

        let err = command_breakthrough(&mut state, &mut rng).unwrap_err();
        assert_eq!(err, CommandError::TribulationInProgress);
    }

    #[test]
    fn test_surviving_tribulation_advances_level() {
        let mut state = test_state();
        make_ready(&mut state, PathId::QiCultivation, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        command_breakthrough(&mut state, &mut rng).unwrap();

        for _ in 0..TRIBULATION_STRIKES_TIER_1 - 1 {
            assert_eq!(
                tribulation_resist_strike(&mut state).unwrap(),
                TribulationStatus::Active
            );
        }
        assert_eq!(
            tribulation_resist_strike(&mut state).unwrap(),
            TribulationStatus::Survived
        );
        assert!(state.tribulation.is_none());
        assert_eq!(state.paths[&PathId::QiCultivation].level, 5);
        assert!(!state.paths[&PathId::QiCultivation].breakthrough_ready);
    }

    #[test]
    fn test_failed_tribulation_kills() {
        let mut state = test_state();
        make_ready(&mut state, PathId::QiCultivation, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        command_breakthrough(&mut state, &mut rng).unwrap();

        // 30% damage per miss: the fourth miss is fatal.
        for _ in 0..3 {
            assert_eq!(
                tribulation_fail_strike(&mut state).unwrap(),
                TribulationStatus::Active
            );
        }
        assert_eq!(
            tribulation_fail_strike(&mut state).unwrap(),
            TribulationStatus::Failed
        );
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.paths[&PathId::QiCultivation].level, 4);
    }

    #[test]
    fn test_pill_bonus_consumed_by_attempt() {
        let mut state = test_state();
        make_ready(&mut state, PathId::QiCultivation, 2);
        state.pending_pill_bonus = 0.25;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        command_breakthrough(&mut state, &mut rng).unwrap();
        assert_eq!(state.pending_pill_bonus, 0.0);
    }

    #[test]
    fn test_pill_bonus_kept_when_not_ready() {
        let mut state = test_state();
        state.pending_pill_bonus = 0.25;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let result = command_breakthrough(&mut state, &mut rng).unwrap();
        assert_eq!(
            result,
            BreakthroughCommand::Resolved(BreakthroughOutcome::NotReady)
        );
        assert_eq!(state.pending_pill_bonus, 0.25);
    }

    #[test]
    fn test_event_option_applies_and_clears() {
        let mut state = test_state();
        state.pending_event = Some(EventId::WanderingHerbalist);
        let karma = state.character.karma;

        choose_event_option(&mut state, 0).unwrap();
        assert!(state.pending_event.is_none());
        assert_eq!(state.character.karma, karma + 10);
        assert!(state.has_item(ItemId::SpiritHerb));

        assert_eq!(
            choose_event_option(&mut state, 0).unwrap_err(),
            CommandError::NoPendingEvent
        );
    }

    #[test]
    fn test_event_bad_option_rejected() {
        let mut state = test_state();
        state.pending_event = Some(EventId::WanderingHerbalist);
        assert_eq!(
            choose_event_option(&mut state, 99).unwrap_err(),
            CommandError::BadOption(99)
        );
        assert!(state.pending_event.is_some());
    }

    #[test]
    fn test_set_active_path_requires_unlock() {
        let mut state = test_state();
        assert_eq!(
            set_active_path(&mut state, PathId::SwordDao).unwrap_err(),
            CommandError::PathLocked(PathId::SwordDao)
        );
        set_active_path(&mut state, PathId::BodyTempering).unwrap();
        assert_eq!(state.active_path, Some(PathId::BodyTempering));
    }

    #[test]
    fn test_commands_rejected_while_dead() {
        let mut state = test_state();
        state.phase = GamePhase::Dead;
        assert_eq!(
            set_action(&mut state, Action::Cultivate).unwrap_err(),
            CommandError::Dead
        );
        assert_eq!(
            travel_to(&mut state, RegionId::VerdantForest).unwrap_err(),
            CommandError::Dead
        );
    }
}
