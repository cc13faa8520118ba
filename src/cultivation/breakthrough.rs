//! Breakthrough resolution: a single attempt against the current level's
//! success probability, with four failure bands on a second draw.

use crate::core::constants::{
    BREAKTHROUGH_DEFAULT_BASE_RATE, BREAKTHROUGH_LUCK_FACTOR, BREAKTHROUGH_MAX_CHANCE,
    CRIPPLE_XP_FRACTION, FAILURE_CRIPPLE_THRESHOLD, FAILURE_DEATH_THRESHOLD,
    FAILURE_DEVIATION_THRESHOLD, QI_DEVIATION_DURATION_SECONDS, SETBACK_XP_FRACTION,
};
use crate::core::game_state::GameState;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of a breakthrough attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakthroughOutcome {
    /// No ready path was selected; nothing was mutated.
    NotReady,
    /// Level advanced by one. `terminal` marks a path that just hit the cap.
    Success { new_level: u32, terminal: bool },
    /// Fatal failure. Path state is untouched; the caller invokes rebirth.
    Death,
    /// Level dropped by one (floor 1), XP set to half the new requirement.
    CripplingInjury { new_level: u32 },
    /// XP reset, qi deviation inflicted for a fixed duration.
    QiDeviation,
    /// XP reduced to 70% of the requirement.
    MinorSetback,
}

/// Base success rate for breaking through from `level`.
/// Undefined levels default to 0.10.
pub fn base_rate_for_level(level: u32) -> f64 {
    match level {
        1 => 0.50,
        2 => 0.45,
        3 => 0.40,
        4 => 0.30,
        5 => 0.28,
        6 => 0.25,
        7 => 0.22,
        8 => 0.18,
        9 => 0.15,
        10 => 0.12,
        _ => BREAKTHROUGH_DEFAULT_BASE_RATE,
    }
}

/// Success probability, clamped to [0, 0.95].
pub fn success_chance(level: u32, luck: f64, pill_bonus: f64) -> f64 {
    let chance = base_rate_for_level(level) + pill_bonus + luck * BREAKTHROUGH_LUCK_FACTOR;
    chance.clamp(0.0, BREAKTHROUGH_MAX_CHANCE)
}

/// Resolves a breakthrough attempt on the active path.
///
/// Precondition: the active path exists, is unlocked, and is
/// breakthrough-ready; otherwise returns [`BreakthroughOutcome::NotReady`]
/// without mutation. Tier-boundary routing into the tribulation happens in
/// the command layer, not here.
pub fn attempt_breakthrough<R: Rng>(
    state: &mut GameState,
    pill_bonus: f64,
    rng: &mut R,
) -> BreakthroughOutcome {
    let Some(path_id) = state.active_path else {
        return BreakthroughOutcome::NotReady;
    };
    let ready = state
        .paths
        .get(&path_id)
        .map(|p| p.unlocked && p.breakthrough_ready && !p.is_max_level())
        .unwrap_or(false);
    if !ready {
        return BreakthroughOutcome::NotReady;
    }

    let level = state.paths[&path_id].level;
    let chance = success_chance(level, state.character.luck, pill_bonus.max(0.0));

    if rng.gen::<f64>() < chance {
        let progress = state.paths.get_mut(&path_id).expect("checked above");
        progress.advance_level();
        return BreakthroughOutcome::Success {
            new_level: progress.level,
            terminal: progress.is_max_level(),
        };
    }

    // Failure: a second uniform draw selects the consequence band.
    let band = rng.gen::<f64>();
    if band < FAILURE_DEATH_THRESHOLD {
        BreakthroughOutcome::Death
    } else if band < FAILURE_CRIPPLE_THRESHOLD {
        let progress = state.paths.get_mut(&path_id).expect("checked above");
        progress.cripple(CRIPPLE_XP_FRACTION);
        BreakthroughOutcome::CripplingInjury {
            new_level: progress.level,
        }
    } else if band < FAILURE_DEVIATION_THRESHOLD {
        let progress = state.paths.get_mut(&path_id).expect("checked above");
        progress.set_xp_fraction(0.0);
        state.qi_deviation.active = true;
        state.qi_deviation.remaining_seconds = QI_DEVIATION_DURATION_SECONDS;
        BreakthroughOutcome::QiDeviation
    } else {
        let progress = state.paths.get_mut(&path_id).expect("checked above");
        progress.set_xp_fraction(SETBACK_XP_FRACTION);
        BreakthroughOutcome::MinorSetback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cultivation::paths::PathId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// RNG stub returning a fixed sequence of f64 draws.
    struct FixedDraws {
        draws: Vec<f64>,
        next: usize,
    }

    impl FixedDraws {
        fn new(draws: Vec<f64>) -> Self {
            Self { draws, next: 0 }
        }
    }

    impl rand::RngCore for FixedDraws {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }
        fn next_u64(&mut self) -> u64 {
            let v = self.draws[self.next.min(self.draws.len() - 1)];
            self.next += 1;
            // rand's Standard f64 takes the high 53 bits scaled by 2^-53.
            ((v * (1u64 << 53) as f64) as u64) << 11
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn ready_state() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = GameState::new("Test".to_string(), 0, &mut rng);
        let progress = state.paths.get_mut(&PathId::QiCultivation).unwrap();
        let needed = progress.xp_required;
        progress.grant_xp(needed);
        state
    }

    #[test]
    fn test_success_chance_clamped() {
        assert!(success_chance(1, 1.0, 10.0) <= BREAKTHROUGH_MAX_CHANCE);
        assert!(success_chance(12, 0.1, 0.0) >= 0.0);
        for level in 1..=12 {
            let chance = success_chance(level, 0.5, 0.1);
            assert!((0.0..=BREAKTHROUGH_MAX_CHANCE).contains(&chance));
        }
    }

    #[test]
    fn test_undefined_levels_use_default_rate() {
        assert_eq!(base_rate_for_level(11), BREAKTHROUGH_DEFAULT_BASE_RATE);
        assert_eq!(base_rate_for_level(99), BREAKTHROUGH_DEFAULT_BASE_RATE);
    }

    #[test]
    fn test_not_ready_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = GameState::new("Test".to_string(), 0, &mut rng);
        let before = state.paths.clone();

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::NotReady);
        assert_eq!(state.paths, before);
    }

    #[test]
    fn test_no_active_path_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = ready_state();
        state.active_path = None;

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::NotReady);
    }

    #[test]
    fn test_success_advances_level() {
        // First draw 0.0 < chance: guaranteed success.
        let mut rng = FixedDraws::new(vec![0.0]);
        let mut state = ready_state();

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(
            outcome,
            BreakthroughOutcome::Success {
                new_level: 2,
                terminal: false
            }
        );
        let progress = &state.paths[&PathId::QiCultivation];
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_xp, 0.0);
        assert!(!progress.breakthrough_ready);
    }

    #[test]
    fn test_death_band_leaves_path_unchanged() {
        // Fail the success roll, then land below the death threshold.
        let mut rng = FixedDraws::new(vec![0.999, FAILURE_DEATH_THRESHOLD / 2.0]);
        let mut state = ready_state();
        let before = state.paths[&PathId::QiCultivation].clone();

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::Death);
        assert_eq!(state.paths[&PathId::QiCultivation], before);
    }

    #[test]
    fn test_cripple_band_drops_level_with_floor() {
        let mut rng = FixedDraws::new(vec![0.999, 0.10]);
        let mut state = ready_state();

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::CripplingInjury { new_level: 1 });
        let progress = &state.paths[&PathId::QiCultivation];
        assert_eq!(progress.level, 1);
        assert!((progress.current_xp - progress.xp_required * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_deviation_band_inflicts_qi_deviation() {
        let mut rng = FixedDraws::new(vec![0.999, 0.30]);
        let mut state = ready_state();

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::QiDeviation);
        assert!(state.qi_deviation.active);
        assert_eq!(
            state.qi_deviation.remaining_seconds,
            QI_DEVIATION_DURATION_SECONDS
        );
        assert_eq!(state.paths[&PathId::QiCultivation].current_xp, 0.0);
    }

    #[test]
    fn test_setback_band_keeps_most_xp() {
        let mut rng = FixedDraws::new(vec![0.999, 0.80]);
        let mut state = ready_state();

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::MinorSetback);
        let progress = &state.paths[&PathId::QiCultivation];
        assert!((progress.current_xp - progress.xp_required * 0.7).abs() < 1e-9);
        assert!(!progress.breakthrough_ready);
    }

    #[test]
    fn test_level_twelve_is_terminal() {
        let mut rng = FixedDraws::new(vec![0.0]);
        let mut state = ready_state();
        {
            let progress = state.paths.get_mut(&PathId::QiCultivation).unwrap();
            progress.level = 11;
            progress.breakthrough_ready = true;
        }

        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(
            outcome,
            BreakthroughOutcome::Success {
                new_level: 12,
                terminal: true
            }
        );

        // A further attempt on the capped path is a no-op.
        let mut rng = FixedDraws::new(vec![0.0]);
        state.paths.get_mut(&PathId::QiCultivation).unwrap().breakthrough_ready = true;
        let outcome = attempt_breakthrough(&mut state, 0.0, &mut rng);
        assert_eq!(outcome, BreakthroughOutcome::NotReady);
    }
}
