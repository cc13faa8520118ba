// Tick and timing
pub const TICK_INTERVAL_SECONDS: u64 = 1;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// XP and leveling
pub const BASE_XP_PER_TICK: f64 = 1.0;
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const MAX_PATH_LEVEL: u32 = 12;
pub const LEVELS_PER_TIER: u32 = 4;
pub const CLICK_BOOST_FACTOR: f64 = 2.0;
pub const QI_DEVIATION_XP_FACTOR: f64 = 0.5;

// Breakthrough
pub const BREAKTHROUGH_MAX_CHANCE: f64 = 0.95;
pub const BREAKTHROUGH_DEFAULT_BASE_RATE: f64 = 0.10;
pub const BREAKTHROUGH_LUCK_FACTOR: f64 = 0.05;
// Failure outcome bands (cumulative thresholds on a second uniform draw)
pub const FAILURE_DEATH_THRESHOLD: f64 = 0.05;
pub const FAILURE_CRIPPLE_THRESHOLD: f64 = 0.20;
pub const FAILURE_DEVIATION_THRESHOLD: f64 = 0.50;
pub const CRIPPLE_XP_FRACTION: f64 = 0.5;
pub const SETBACK_XP_FRACTION: f64 = 0.7;
pub const QI_DEVIATION_DURATION_SECONDS: i64 = 600;

// Tribulation
pub const TRIBULATION_STRIKES_TIER_1: u32 = 3;
pub const TRIBULATION_STRIKES_TIER_2: u32 = 6;
pub const TRIBULATION_WINDOW_TIER_1_SECONDS: f64 = 5.0;
pub const TRIBULATION_WINDOW_TIER_2_SECONDS: f64 = 3.0;
pub const TRIBULATION_HP_PER_LEVEL: f64 = 20.0;
pub const TRIBULATION_STRIKE_DAMAGE_FRACTION: f64 = 0.30;

// Exploration
pub const EXPLORE_STONE_TRICKLE_CHANCE: f64 = 0.08;
pub const EXPLORE_STONE_TRICKLE_MIN: u64 = 1;
pub const EXPLORE_STONE_TRICKLE_MAX: u64 = 5;
pub const EXPLORE_LOOT_BASE_CHANCE: f64 = 0.03;
pub const EXPLORE_LOOT_LUCK_FACTOR: f64 = 0.03;
pub const EXPLORE_LOOT_ROGUE_BONUS: f64 = 0.01;
pub const FATED_ENCOUNTER_BASE_CHANCE: f64 = 0.001;
pub const FATED_ENCOUNTER_LUCK_FACTOR: f64 = 0.002;
pub const EVENT_DRAW_INTERVAL_TICKS: u64 = 60;
pub const STONE_POUCH_MIN: u64 = 10;
pub const STONE_POUCH_MAX: u64 = 50;

// Special path unlock chances (rolled once per tick when eligible)
pub const BEAST_TAMING_UNLOCK_CHANCE: f64 = 0.005;
pub const BEAST_TAMING_UNLOCK_LUCK_FACTOR: f64 = 0.005;
pub const TALISMAN_UNLOCK_CHANCE: f64 = 0.0005;
pub const DEVIL_KARMA_THRESHOLD: i32 = -100;

// Karma
pub const KARMA_MIN: i32 = -1000;
pub const KARMA_MAX: i32 = 1000;
pub const KARMA_VISIBLE_LEVEL: u32 = 5;

// Travel
pub const TRAVEL_BASE_SECONDS: i64 = 10;
pub const TRAVEL_SECONDS_PER_DANGER: i64 = 5;

// Offline catch-up
pub const MAX_OFFLINE_SECONDS: i64 = 8 * 60 * 60;
pub const MIN_OFFLINE_SECONDS: i64 = 5;
pub const OFFLINE_STONE_INTERVAL_SECONDS: i64 = 600;
pub const OFFLINE_STONES_PER_INTERVAL: u64 = 5;

// Rebirth / legacy
pub const LEGACY_BONUS_PER_LEVEL: f64 = 0.05;

// Trait roll bounds at character creation
pub const AFFINITY_MIN: f64 = 0.5;
pub const AFFINITY_MAX: f64 = 1.5;
pub const BODY_MIN: f64 = 0.5;
pub const BODY_MAX: f64 = 1.5;
pub const LUCK_MIN: f64 = 0.1;
pub const LUCK_MAX: f64 = 1.0;

// Boost purchase (buy_boost command)
pub const BOOST_COST_STONES: u64 = 50;
pub const BOOST_XP_MULTIPLIER: f64 = 1.5;
pub const BOOST_DURATION_SECONDS: i64 = 120;

// Event log
pub const EVENT_LOG_CAPACITY: usize = 50;

// Persistence: "ASCEND" tag plus format revision
pub const SAVE_VERSION_MAGIC: u64 = 0x4153_4345_4E44_0001;
