//! Character identity: rolled traits, karma, and the rebirth cycle.

pub mod rebirth;
pub mod traits;

pub use rebirth::{rebirth, RebirthReport};
pub use traits::{Background, Character};
