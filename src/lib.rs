//! Ascend - Idle Cultivation Simulation Core
//!
//! This crate exposes the headless game logic: a deterministic tick
//! engine, the breakthrough and tribulation state machines, exploration
//! and narrative events, offline catch-up, and the rebirth loop. All
//! randomness flows through caller-supplied `rand::Rng` handles so every
//! mechanic is testable with a seeded generator.

pub mod build_info;
pub mod character;
pub mod core;
pub mod cultivation;
pub mod items;
pub mod save_manager;
pub mod utils;
pub mod world;

pub use crate::core::commands;
pub use crate::core::constants;
pub use crate::core::game_state::{Action, GamePhase, GameState};
pub use crate::core::offline::{catch_up, OfflineReport};
pub use crate::core::tick::{tick, TickEvent, TickResult};
pub use crate::save_manager::SaveManager;
