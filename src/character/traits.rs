//! Character traits rolled at creation, plus the mutable karma/status fields.

use crate::core::constants::{
    AFFINITY_MAX, AFFINITY_MIN, BODY_MAX, BODY_MIN, KARMA_MAX, KARMA_MIN, LUCK_MAX, LUCK_MIN,
};
use crate::utils::rng::{skewed_roll, weighted_pick};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Birth background with a fixed bonus effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    Peasant,
    Noble,
    Merchant,
    Hunter,
    OrphanRogue,
}

impl Background {
    pub fn name(&self) -> &'static str {
        match self {
            Background::Peasant => "Peasant",
            Background::Noble => "Noble",
            Background::Merchant => "Merchant",
            Background::Hunter => "Hunter",
            Background::OrphanRogue => "Orphan Rogue",
        }
    }

    /// Flat bonus to the exploration loot chance.
    pub fn loot_chance_bonus(&self) -> f64 {
        match self {
            Background::Merchant => 0.01,
            Background::Hunter => 0.015,
            Background::OrphanRogue => 0.01,
            _ => 0.0,
        }
    }

    /// Spirit stones granted at character creation.
    pub fn starting_stones(&self) -> u64 {
        match self {
            Background::Noble => 200,
            Background::Merchant => 100,
            _ => 0,
        }
    }

    /// Starting karma offset.
    pub fn starting_karma(&self) -> i32 {
        match self {
            Background::OrphanRogue => -20,
            _ => 0,
        }
    }

    fn weight(&self) -> f64 {
        match self {
            Background::Peasant => 40.0,
            Background::Noble => 10.0,
            Background::Merchant => 20.0,
            Background::Hunter => 20.0,
            Background::OrphanRogue => 10.0,
        }
    }

    const ALL: [Background; 5] = [
        Background::Peasant,
        Background::Noble,
        Background::Merchant,
        Background::Hunter,
        Background::OrphanRogue,
    ];
}

/// A cultivator: traits fixed at creation plus mutable progression state.
///
/// Owned exclusively by the aggregate [`GameState`](crate::core::GameState);
/// replaced wholesale on rebirth except for the explicitly carried fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    // Immutable at creation
    pub spirit_affinity: f64,
    pub body_multiplier: f64,
    pub background: Background,
    /// Luck in [0.1, 1.0]; scales loot, fated encounters, and breakthroughs.
    pub luck: f64,

    // Mutable progression state
    pub karma: i32,
    pub rogue: bool,
    pub rebirth_count: u32,
    pub total_deaths: u32,
    /// Cumulative XP-speed bonus carried across rebirths. Never decreases.
    pub legacy_bonus: f64,
    pub devil_marked: bool,
    pub redeemed_devil: bool,
}

impl Character {
    /// Rolls a fresh character. Trait rolls use the skewed distribution so
    /// high affinity/body/luck stays rare; the background is a weighted pick.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let background = *weighted_pick(rng, &Background::ALL, |b| b.weight())
            .expect("background table is non-empty");
        Self {
            spirit_affinity: skewed_roll(rng, AFFINITY_MIN, AFFINITY_MAX),
            body_multiplier: skewed_roll(rng, BODY_MIN, BODY_MAX),
            background,
            luck: skewed_roll(rng, LUCK_MIN, LUCK_MAX),
            karma: background.starting_karma(),
            rogue: background == Background::OrphanRogue,
            rebirth_count: 0,
            total_deaths: 0,
            legacy_bonus: 0.0,
            devil_marked: false,
            redeemed_devil: false,
        }
    }

    /// Applies a karma delta, clamped to [-1000, 1000].
    pub fn add_karma(&mut self, delta: i32) {
        self.karma = self.karma.saturating_add(delta).clamp(KARMA_MIN, KARMA_MAX);
    }
}
