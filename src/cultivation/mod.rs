//! Cultivation mechanics: paths, level progression, breakthroughs, and
//! heavenly tribulations.

pub mod breakthrough;
pub mod paths;
pub mod progression;
pub mod tribulation;

pub use breakthrough::BreakthroughOutcome;
pub use paths::PathId;
pub use progression::PathProgress;
pub use tribulation::{Tribulation, TribulationStatus};
