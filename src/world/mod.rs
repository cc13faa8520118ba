//! The world map, exploration rolls, and narrative events.

pub mod events;
pub mod exploration;
pub mod regions;

pub use events::EventId;
pub use regions::RegionId;
