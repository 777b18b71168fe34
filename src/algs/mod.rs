//! Re-export public algorithms.

pub mod classify;
pub mod compatibility;
pub mod meshgen;
pub mod orient;
pub mod priority;
pub mod type0;
pub mod type1;

pub use classify::classify_vertices;
pub use compatibility::{strong_check, weak_check};
pub use orient::{OrientationOutcome, OrientationStrategy, OrientedMesh, orient};
pub use type0::orient_type0;
pub use type1::orient_type1;
