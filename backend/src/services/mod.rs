//! Pure computations over estates and their trees.
//!
//! Nothing here performs I/O. The orchestration that loads estates and trees
//! from storage and feeds them to these functions lives in
//! [`crate::db::services`].

pub mod drone_plan;
pub mod placement;
pub mod stats;

pub use drone_plan::{compute_drone_plan, DronePlan};
pub use placement::validate_placement;
pub use stats::{compute_stats, EstateStats};
