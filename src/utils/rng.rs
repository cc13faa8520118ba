//! Randomness and distribution helpers shared across the simulation.
//!
//! All helpers take `&mut impl Rng` so callers can pass a seeded
//! `rand_chacha::ChaCha8Rng` in tests for deterministic behavior.

use crate::items::Rarity;
use rand::Rng;

/// Single probability check: true with probability `chance` (clamped to [0, 1]).
pub fn percent_check<R: Rng>(rng: &mut R, chance: f64) -> bool {
    let chance = chance.clamp(0.0, 1.0);
    rng.gen::<f64>() < chance
}

/// Weighted selection over a candidate list with nonnegative weights.
///
/// Draws a uniform value in [0, total_weight) and subtracts weights in list
/// order until the remainder is <= 0. Ties favor earlier list order.
/// Returns None for an empty list or zero total weight.
pub fn weighted_pick<'a, T, R, F>(rng: &mut R, candidates: &'a [T], weight: F) -> Option<&'a T>
where
    R: Rng,
    F: Fn(&T) -> f64,
{
    let total: f64 = candidates.iter().map(|c| weight(c).max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut remainder = rng.gen::<f64>() * total;
    for candidate in candidates {
        remainder -= weight(candidate).max(0.0);
        if remainder <= 0.0 {
            return Some(candidate);
        }
    }
    // Floating point residue: fall back to the last candidate.
    candidates.last()
}

/// Skewed roll in [min, max], biased toward the low end.
///
/// The product of two uniforms concentrates mass near zero, so high rolls
/// stay rare. Used for trait rolls at character creation.
pub fn skewed_roll<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let skew = rng.gen::<f64>() * rng.gen::<f64>();
    min + skew * (max - min)
}

/// Rarity roll for decorative labels (character-creation flavor).
///
/// Buckets a uniform draw against luck-inflated thresholds, checked from
/// Mythic down to Common. Luck inflates every threshold by the same factor,
/// shifting mass away from Common.
pub fn roll_rarity<R: Rng>(rng: &mut R, luck: f64) -> Rarity {
    let roll = rng.gen::<f64>();
    let inflate = 1.0 + luck;

    let mythic = 0.001 * inflate;
    let legendary = mythic + 0.006 * inflate;
    let epic = legendary + 0.025 * inflate;
    let rare = epic + 0.08 * inflate;
    let uncommon = rare + 0.20 * inflate;

    if roll < mythic {
        Rarity::Mythic
    } else if roll < legendary {
        Rarity::Legendary
    } else if roll < epic {
        Rarity::Epic
    } else if roll < rare {
        Rarity::Rare
    } else if roll < uncommon {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}
