//! The simulation core: state, constants, the tick engine, offline
//! catch-up, and the player command surface.

pub mod commands;
pub mod constants;
pub mod game_state;
pub mod offline;
pub mod tick;
