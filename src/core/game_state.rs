//! The aggregate game state: the single mutable root every tick and
//! command reads and writes.

use super::constants::EVENT_LOG_CAPACITY;
use crate::character::traits::Character;
use crate::cultivation::paths::{PathId, STARTING_PATHS};
use crate::cultivation::progression::PathProgress;
use crate::cultivation::tribulation::Tribulation;
use crate::items::{get_item, InventoryItem, ItemId};
use crate::utils::rng::roll_rarity;
use crate::world::events::EventId;
use crate::world::regions::{RegionId, STARTING_REGION};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    CharacterCreation,
    Playing,
    Dead,
}

/// The global current action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Idle,
    Cultivate,
    Train,
    Explore,
}

/// A timed multiplicative XP buff. Multiple buffs combine multiplicatively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub name: String,
    pub multiplier: f64,
    pub remaining_seconds: i64,
}

/// Singleton qi-deviation debuff; halves XP speed while active.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QiDeviation {
    pub active: bool,
    pub remaining_seconds: i64,
}

/// Singleton travel state; suspends all other tick effects while active.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelState {
    pub traveling: bool,
    pub destination: Option<RegionId>,
    pub remaining_seconds: i64,
}

/// One line of the bounded, newest-first narration log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub text: String,
}

/// Main game state containing all character progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub character_id: String,
    pub character_name: String,
    pub character: Character,
    pub phase: GamePhase,
    pub paths: BTreeMap<PathId, PathProgress>,
    pub action: Action,
    pub active_path: Option<PathId>,
    pub spirit_stones: u64,
    pub inventory: Vec<InventoryItem>,
    pub location: RegionId,
    pub discovered_regions: BTreeSet<RegionId>,
    pub travel: TravelState,
    pub buffs: Vec<ActiveBuff>,
    pub qi_deviation: QiDeviation,
    /// Sect or group affiliation, if any.
    pub sect: Option<String>,
    /// One-way flag: karma becomes visible once any path reaches level 5.
    pub karma_visible: bool,
    /// Transient hand-off slot for the presentation layer. While occupied,
    /// no further narrative triggers fire.
    pub pending_event: Option<EventId>,
    /// Breakthrough bonus armed by a pill, consumed by the next attempt.
    #[serde(default)]
    pub pending_pill_bonus: f64,
    /// Active tribulation, if one is in progress.
    #[serde(default)]
    pub tribulation: Option<Tribulation>,
    pub tick_count: u64,
    pub play_time_seconds: u64,
    pub highest_level: u32,
    pub last_save_time: i64,
    /// Bounded narration log, newest first.
    #[serde(default)]
    pub log: VecDeque<LogEntry>,
    /// Monotonic log id counter; explicit state, not a global.
    #[serde(default)]
    pub next_log_id: u64,
}

impl GameState {
    /// Creates a fresh state with a newly rolled character.
    pub fn new<R: Rng>(character_name: String, current_time: i64, rng: &mut R) -> Self {
        let character = Character::roll(rng);
        let grade = roll_rarity(rng, character.luck);
        let background = character.background.name();
        let mut state = Self::from_character(character_name, character, current_time);
        state.push_log(format!(
            "A {background} child awakens a {} spirit root.",
            grade.label()
        ));
        state
    }

    /// Creates a fresh state around an existing character. Used both at
    /// creation and by rebirth, which overlays its carried fields afterward.
    pub fn from_character(character_name: String, character: Character, current_time: i64) -> Self {
        let mut paths = BTreeMap::new();
        for id in STARTING_PATHS {
            paths.insert(id, PathProgress::new());
        }

        let mut discovered_regions = BTreeSet::new();
        discovered_regions.insert(STARTING_REGION);

        let spirit_stones = character.background.starting_stones();

        Self {
            character_id: uuid::Uuid::new_v4().to_string(),
            character_name,
            character,
            phase: GamePhase::Playing,
            paths,
            action: Action::Idle,
            active_path: Some(PathId::QiCultivation),
            spirit_stones,
            inventory: Vec::new(),
            location: STARTING_REGION,
            discovered_regions,
            travel: TravelState::default(),
            buffs: Vec::new(),
            qi_deviation: QiDeviation::default(),
            sect: None,
            karma_visible: false,
            pending_event: None,
            pending_pill_bonus: 0.0,
            tribulation: None,
            tick_count: 0,
            play_time_seconds: 0,
            highest_level: 1,
            last_save_time: current_time,
            log: VecDeque::new(),
            next_log_id: 0,
        }
    }

    /// Appends a narration line, evicting the oldest past the cap.
    pub fn push_log(&mut self, text: impl Into<String>) {
        if self.log.len() >= EVENT_LOG_CAPACITY {
            self.log.pop_back();
        }
        let id = self.next_log_id;
        self.next_log_id += 1;
        self.log.push_front(LogEntry {
            id,
            text: text.into(),
        });
    }

    /// Product of all active buff multipliers.
    pub fn buff_multiplier(&self) -> f64 {
        self.buffs.iter().map(|b| b.multiplier).product()
    }

    pub fn add_stones(&mut self, amount: u64) {
        self.spirit_stones = self.spirit_stones.saturating_add(amount);
    }

    /// Spends stones if the balance allows it.
    pub fn spend_stones(&mut self, amount: u64) -> bool {
        if self.spirit_stones >= amount {
            self.spirit_stones -= amount;
            true
        } else {
            false
        }
    }

    /// Applies a signed stone delta, floored at zero.
    pub fn adjust_stones(&mut self, delta: i64) {
        if delta >= 0 {
            self.add_stones(delta as u64);
        } else {
            self.spirit_stones = self.spirit_stones.saturating_sub(delta.unsigned_abs());
        }
    }

    pub fn has_item(&self, id: ItemId) -> bool {
        self.inventory.iter().any(|entry| entry.id == id && entry.count > 0)
    }

    /// Adds an item, stacking when the definition allows it. Non-stackable
    /// duplicates are dropped silently.
    pub fn add_item(&mut self, id: ItemId, count: u32) {
        let stackable = get_item(id).stackable;
        if let Some(entry) = self.inventory.iter_mut().find(|entry| entry.id == id) {
            if stackable {
                entry.count = entry.count.saturating_add(count);
            }
            return;
        }
        self.inventory.push(InventoryItem {
            id,
            count: if stackable { count } else { 1 },
        });
    }

    /// Removes one of an item; drops the entry when the stack empties.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|entry| entry.id == id) {
            let entry = &mut self.inventory[pos];
            entry.count = entry.count.saturating_sub(1);
            if entry.count == 0 {
                self.inventory.remove(pos);
            }
            true
        } else {
            false
        }
    }

    /// Recomputes the maximum current level across all unlocked paths.
    /// Never decreases the stored high-water mark.
    pub fn recompute_highest_level(&mut self) {
        let max = self
            .paths
            .values()
            .filter(|p| p.unlocked)
            .map(|p| p.level)
            .max()
            .unwrap_or(1);
        if max > self.highest_level {
            self.highest_level = max;
        }
    }

    /// Progress entry for the active path, if one is selected and unlocked.
    pub fn active_progress(&self) -> Option<&PathProgress> {
        self.active_path
            .and_then(|id| self.paths.get(&id))
            .filter(|p| p.unlocked)
    }
}
