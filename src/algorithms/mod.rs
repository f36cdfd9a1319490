//! Pure geometric computations
//!
//! None of these hold state; the orchestrator in `api` composes them.

pub mod bearing;
pub mod heading;
pub mod sector;
pub mod rotation;

pub use bearing::{initial_bearing, normalize_bearing, great_circle_distance_km};
pub use heading::{Heading, raw_heading, device_heading};
pub use sector::{Direction, classify};
pub use rotation::{face_rotation, target_rotation};
