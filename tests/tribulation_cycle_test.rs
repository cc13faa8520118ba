//! Integration test: the full tribulation cycle at tier boundaries.

use ascend::commands::{
    command_breakthrough, tribulation_fail_strike, tribulation_resist_strike, BreakthroughCommand,
    CommandError,
};
use ascend::constants::{
    TRIBULATION_STRIKES_TIER_1, TRIBULATION_STRIKES_TIER_2, TRIBULATION_WINDOW_TIER_1_SECONDS,
    TRIBULATION_WINDOW_TIER_2_SECONDS,
};
use ascend::cultivation::paths::PathId;
use ascend::cultivation::progression::xp_required;
use ascend::cultivation::tribulation::TribulationStatus;
use ascend::items::ItemId;
use ascend::{GamePhase, GameState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn boundary_state(level: u32) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut state = GameState::new("Stormrider".to_string(), 0, &mut rng);
    let progress = state.paths.get_mut(&PathId::QiCultivation).unwrap();
    progress.level = level;
    progress.xp_required = xp_required(level);
    progress.current_xp = progress.xp_required;
    progress.breakthrough_ready = true;
    state.active_path = Some(PathId::QiCultivation);
    state
}

#[test]
fn test_tier_one_boundary_uses_three_strikes_and_wide_window() {
    let mut state = boundary_state(4);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    command_breakthrough(&mut state, &mut rng).unwrap();

    let trib = state.tribulation.as_ref().unwrap();
    assert_eq!(trib.strikes_required, TRIBULATION_STRIKES_TIER_1);
    assert_eq!(trib.strike_window_seconds, TRIBULATION_WINDOW_TIER_1_SECONDS);
    assert_eq!(trib.hp, trib.max_hp);
}

#[test]
fn test_tier_two_boundary_is_harsher() {
    let mut state = boundary_state(8);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    command_breakthrough(&mut state, &mut rng).unwrap();

    let trib = state.tribulation.as_ref().unwrap();
    assert_eq!(trib.strikes_required, TRIBULATION_STRIKES_TIER_2);
    assert_eq!(trib.strike_window_seconds, TRIBULATION_WINDOW_TIER_2_SECONDS);
}

#[test]
fn test_devil_marked_faces_double_strikes() {
    let mut state = boundary_state(4);
    state.character.devil_marked = true;
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    command_breakthrough(&mut state, &mut rng).unwrap();

    let trib = state.tribulation.as_ref().unwrap();
    assert_eq!(trib.strikes_required, TRIBULATION_STRIKES_TIER_1 * 2);
}

#[test]
fn test_thunderward_talisman_expands_hp_pool() {
    let mut bare = boundary_state(4);
    let mut warded = boundary_state(4);
    warded.add_item(ItemId::ThunderwardTalisman, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    command_breakthrough(&mut bare, &mut rng).unwrap();
    command_breakthrough(&mut warded, &mut rng).unwrap();

    let bare_hp = bare.tribulation.as_ref().unwrap().max_hp;
    let warded_hp = warded.tribulation.as_ref().unwrap().max_hp;
    assert!((warded_hp - bare_hp * 1.25).abs() < 1e-9);
}

#[test]
fn test_mixed_strikes_survive_with_damage() {
    let mut state = boundary_state(4);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    command_breakthrough(&mut state, &mut rng).unwrap();

    // One miss (30% damage), then three resists.
    assert_eq!(
        tribulation_fail_strike(&mut state).unwrap(),
        TribulationStatus::Active
    );
    tribulation_resist_strike(&mut state).unwrap();
    tribulation_resist_strike(&mut state).unwrap();
    assert_eq!(
        tribulation_resist_strike(&mut state).unwrap(),
        TribulationStatus::Survived
    );

    assert!(state.tribulation.is_none());
    let progress = &state.paths[&PathId::QiCultivation];
    assert_eq!(progress.level, 5);
    assert_eq!(progress.current_xp, 0.0);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.highest_level, 5);
}

#[test]
fn test_four_misses_are_fatal() {
    let mut state = boundary_state(8);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    command_breakthrough(&mut state, &mut rng).unwrap();

    for _ in 0..3 {
        tribulation_fail_strike(&mut state).unwrap();
    }
    assert_eq!(
        tribulation_fail_strike(&mut state).unwrap(),
        TribulationStatus::Failed
    );
    assert_eq!(state.phase, GamePhase::Dead);
    assert_eq!(state.paths[&PathId::QiCultivation].level, 8);
}

#[test]
fn test_strike_commands_require_active_tribulation() {
    let mut state = boundary_state(4);
    assert_eq!(
        tribulation_resist_strike(&mut state).unwrap_err(),
        CommandError::NoTribulation
    );
    assert_eq!(
        tribulation_fail_strike(&mut state).unwrap_err(),
        CommandError::NoTribulation
    );
}

#[test]
fn test_non_boundary_levels_skip_tribulation() {
    let mut state = boundary_state(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let result = command_breakthrough(&mut state, &mut rng).unwrap();
    assert!(matches!(result, BreakthroughCommand::Resolved(_)));
    assert!(state.tribulation.is_none());
}
