//! Heavenly tribulation: a bounded multi-strike survival sequence gating
//! tier transitions.
//!
//! The per-strike countdown runs on the scheduler outside the core; the
//! scheduler calls `fail_strike` on window expiry and the player calls
//! `resist_strike` through the command surface. Both are stale-safe: once
//! the sequence is no longer active they are no-ops, so a timer firing
//! after teardown cannot corrupt state.

use super::paths::PathId;
use super::progression::tier_for_level;
use crate::core::constants::{
    TRIBULATION_HP_PER_LEVEL, TRIBULATION_STRIKES_TIER_1, TRIBULATION_STRIKES_TIER_2,
    TRIBULATION_STRIKE_DAMAGE_FRACTION, TRIBULATION_WINDOW_TIER_1_SECONDS,
    TRIBULATION_WINDOW_TIER_2_SECONDS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TribulationStatus {
    Active,
    Survived,
    Failed,
}

/// State of one tribulation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tribulation {
    pub path: PathId,
    pub tier: u32,
    pub strikes_required: u32,
    pub strikes_survived: u32,
    pub max_hp: f64,
    pub hp: f64,
    /// Seconds the player has to resist each strike.
    pub strike_window_seconds: f64,
    pub status: TribulationStatus,
}

impl Tribulation {
    /// Starts a tribulation for a breakthrough from `level` (a tier-boundary
    /// level). The strike count doubles for devil-marked cultivators; the HP
    /// pool scales with level, body, and any tribulation-resistance effect.
    pub fn begin(
        path: PathId,
        level: u32,
        devil_marked: bool,
        body_multiplier: f64,
        resist_fraction: f64,
    ) -> Self {
        let tier = tier_for_level(level);
        let base_strikes = if tier <= 1 {
            TRIBULATION_STRIKES_TIER_1
        } else {
            TRIBULATION_STRIKES_TIER_2
        };
        let strikes_required = if devil_marked {
            base_strikes * 2
        } else {
            base_strikes
        };
        let strike_window_seconds = if tier <= 1 {
            TRIBULATION_WINDOW_TIER_1_SECONDS
        } else {
            TRIBULATION_WINDOW_TIER_2_SECONDS
        };
        let max_hp =
            level as f64 * TRIBULATION_HP_PER_LEVEL * body_multiplier * (1.0 + resist_fraction);

        Self {
            path,
            tier,
            strikes_required,
            strikes_survived: 0,
            max_hp,
            hp: max_hp,
            strike_window_seconds,
            status: TribulationStatus::Active,
        }
    }

    /// Registers a successful resist within the strike window.
    pub fn resist_strike(&mut self) -> TribulationStatus {
        if self.status != TribulationStatus::Active {
            return self.status;
        }
        self.strikes_survived += 1;
        if self.strikes_survived >= self.strikes_required {
            self.status = TribulationStatus::Survived;
        }
        self.status
    }

    /// Applies strike damage after a missed or explicitly failed window.
    pub fn fail_strike(&mut self) -> TribulationStatus {
        if self.status != TribulationStatus::Active {
            return self.status;
        }
        self.hp -= self.max_hp * TRIBULATION_STRIKE_DAMAGE_FRACTION;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.status = TribulationStatus::Failed;
        }
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == TribulationStatus::Active
    }
}
