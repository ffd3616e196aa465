//! Plain domain value types for estates and the trees planted on them.
//!
//! These types carry no persistence annotations; mapping to and from storage
//! rows happens entirely inside the repository implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{EstateId, TreeId};

/// Largest accepted estate length or width, in meters.
pub const MAX_ESTATE_DIMENSION: i32 = 50_000;
/// Shortest tree that can be recorded, in meters.
pub const MIN_TREE_HEIGHT: i32 = 1;
/// Tallest tree that can be recorded, in meters.
pub const MAX_TREE_HEIGHT: i32 = 30;
/// Edge length of a single plot, in meters.
pub const PLOT_SIZE_METERS: i64 = 10;

/// A rectangular estate. `length` runs along the X axis, `width` along Y.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estate {
    pub id: EstateId,
    pub length: i32,
    pub width: i32,
    pub created_at: DateTime<Utc>,
}

/// A tree planted on an estate plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    pub estate_id: EstateId,
    pub x: i32,
    pub y: i32,
    pub height: i32,
    pub created_at: DateTime<Utc>,
}

/// Candidate values for a new estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEstate {
    pub length: i32,
    pub width: i32,
}

/// Candidate values for a new tree. The owning estate is supplied separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTree {
    pub x: i32,
    pub y: i32,
    pub height: i32,
}

impl NewEstate {
    pub fn new(length: i32, width: i32) -> Self {
        Self { length, width }
    }

    /// Check both dimensions lie in `1..=MAX_ESTATE_DIMENSION`.
    pub fn validate(&self) -> Result<(), String> {
        check_range("length", self.length, 1, MAX_ESTATE_DIMENSION)?;
        check_range("width", self.width, 1, MAX_ESTATE_DIMENSION)?;
        Ok(())
    }
}

impl NewTree {
    pub fn new(x: i32, y: i32, height: i32) -> Self {
        Self { x, y, height }
    }

    /// Check the schema-level bounds of a tree.
    ///
    /// Only the lower bounds of the position are checked here; the upper
    /// bounds depend on the owning estate and are enforced by
    /// [`crate::services::placement::validate_placement`].
    pub fn validate(&self) -> Result<(), String> {
        check_range("x", self.x, 1, MAX_ESTATE_DIMENSION)?;
        check_range("y", self.y, 1, MAX_ESTATE_DIMENSION)?;
        check_range("height", self.height, MIN_TREE_HEIGHT, MAX_TREE_HEIGHT)?;
        Ok(())
    }
}

fn check_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), String> {
    if value < min || value > max {
        return Err(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        ));
    }
    Ok(())
}
