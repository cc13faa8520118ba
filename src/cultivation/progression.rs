//! XP-requirement curve, tier derivation, and per-path progress state.

use crate::core::constants::{
    LEVELS_PER_TIER, MAX_PATH_LEVEL, XP_CURVE_BASE, XP_CURVE_EXPONENT,
};
use serde::{Deserialize, Serialize};

/// XP required to break through from `level` to the next.
/// Monotonically increasing with level.
pub fn xp_required(level: u32) -> f64 {
    XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)
}

/// Tier for a level: 1 for levels 1-4, 2 for 5-8, 3 for 9-12.
pub fn tier_for_level(level: u32) -> u32 {
    ((level.clamp(1, MAX_PATH_LEVEL) - 1) / LEVELS_PER_TIER) + 1
}

/// True if breaking through from `level` crosses a tier boundary
/// (the last level of tier 1 or tier 2).
pub fn is_tier_boundary(level: u32) -> bool {
    level == LEVELS_PER_TIER || level == LEVELS_PER_TIER * 2
}

/// Mutable progress along one unlocked path.
///
/// Invariant: `current_xp <= xp_required` always; equality implies
/// `breakthrough_ready`, and XP accrual stops until a breakthrough
/// is attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    pub level: u32,
    pub current_xp: f64,
    pub xp_required: f64,
    pub breakthrough_ready: bool,
    pub unlocked: bool,
}

impl PathProgress {
    pub fn new() -> Self {
        Self {
            level: 1,
            current_xp: 0.0,
            xp_required: xp_required(1),
            breakthrough_ready: false,
            unlocked: true,
        }
    }

    /// Adds XP, clamping at the requirement and flagging readiness.
    /// No-ops while ready or at the terminal level.
    pub fn grant_xp(&mut self, amount: f64) {
        if self.breakthrough_ready || self.is_max_level() || amount <= 0.0 {
            return;
        }
        self.current_xp += amount;
        if self.current_xp >= self.xp_required {
            self.current_xp = self.xp_required;
            self.breakthrough_ready = true;
        }
    }

    /// Advances one level after a successful breakthrough.
    pub fn advance_level(&mut self) {
        if self.is_max_level() {
            return;
        }
        self.level += 1;
        self.current_xp = 0.0;
        self.xp_required = xp_required(self.level);
        self.breakthrough_ready = false;
    }

    /// Drops one level (floor 1) and sets XP to `xp_fraction` of the new
    /// requirement. Used by the crippling-injury breakthrough outcome.
    pub fn cripple(&mut self, xp_fraction: f64) {
        self.level = self.level.saturating_sub(1).max(1);
        self.xp_required = xp_required(self.level);
        self.current_xp = self.xp_required * xp_fraction;
        self.breakthrough_ready = false;
    }

    /// Sets XP to `xp_fraction` of the current requirement and clears
    /// readiness. Used by the setback and qi-deviation outcomes.
    pub fn set_xp_fraction(&mut self, xp_fraction: f64) {
        self.current_xp = self.xp_required * xp_fraction;
        self.breakthrough_ready = false;
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_PATH_LEVEL
    }

    pub fn tier(&self) -> u32 {
        tier_for_level(self.level)
    }
}

impl Default for PathProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_required_monotonic() {
        for level in 1..MAX_PATH_LEVEL {
            assert!(xp_required(level + 1) > xp_required(level));
        }
    }

    #[test]
    fn test_tier_for_level() {
        assert_eq!(tier_for_level(1), 1);
        assert_eq!(tier_for_level(4), 1);
        assert_eq!(tier_for_level(5), 2);
        assert_eq!(tier_for_level(8), 2);
        assert_eq!(tier_for_level(9), 3);
        assert_eq!(tier_for_level(12), 3);
    }

    #[test]
    fn test_tier_boundaries() {
        assert!(is_tier_boundary(4));
        assert!(is_tier_boundary(8));
        assert!(!is_tier_boundary(1));
        assert!(!is_tier_boundary(5));
        assert!(!is_tier_boundary(12));
    }

    #[test]
    fn test_grant_xp_clamps_and_flags_ready() {
        let mut progress = PathProgress::new();
        progress.grant_xp(progress.xp_required * 10.0);

        assert_eq!(progress.current_xp, progress.xp_required);
        assert!(progress.breakthrough_ready);
    }

    #[test]
    fn test_grant_xp_noop_while_ready() {
        let mut progress = PathProgress::new();
        progress.grant_xp(progress.xp_required);
        let xp_before = progress.current_xp;

        progress.grant_xp(50.0);
        assert_eq!(progress.current_xp, xp_before);
    }

    #[test]
    fn test_grant_xp_ignores_nonpositive() {
        let mut progress = PathProgress::new();
        progress.grant_xp(-10.0);
        assert_eq!(progress.current_xp, 0.0);
    }

    #[test]
    fn test_advance_level_resets_xp() {
        let mut progress = PathProgress::new();
        progress.grant_xp(progress.xp_required);
        progress.advance_level();

        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_xp, 0.0);
        assert_eq!(progress.xp_required, xp_required(2));
        assert!(!progress.breakthrough_ready);
    }

    #[test]
    fn test_advance_level_terminal_at_max() {
        let mut progress = PathProgress::new();
        progress.level = MAX_PATH_LEVEL;
        progress.advance_level();
        assert_eq!(progress.level, MAX_PATH_LEVEL);
    }

    #[test]
    fn test_cripple_floors_at_level_one() {
        let mut progress = PathProgress::new();
        progress.cripple(0.5);

        assert_eq!(progress.level, 1);
        assert_eq!(progress.current_xp, progress.xp_required * 0.5);
        assert!(!progress.breakthrough_ready);
    }

    #[test]
    fn test_cripple_drops_level() {
        let mut progress = PathProgress::new();
        progress.level = 5;
        progress.xp_required = xp_required(5);
        progress.cripple(0.5);

        assert_eq!(progress.level, 4);
        assert_eq!(progress.xp_required, xp_required(4));
    }
}
