//! Public API surface for the Rust backend.
//!
//! This file consolidates identifiers and the result types returned by the
//! estate queries. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{Estate, NewEstate, NewTree, Tree};
pub use crate::services::drone_plan::DronePlan;
pub use crate::services::stats::EstateStats;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Estate identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstateId(pub Uuid);

/// Tree identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(pub Uuid);

impl EstateId {
    pub fn new(value: Uuid) -> Self {
        EstateId(value)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        EstateId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl TreeId {
    pub fn new(value: Uuid) -> Self {
        TreeId(value)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        TreeId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for EstateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EstateId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(EstateId)
    }
}

impl FromStr for TreeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(TreeId)
    }
}

impl From<EstateId> for Uuid {
    fn from(id: EstateId) -> Self {
        id.0
    }
}

impl From<TreeId> for Uuid {
    fn from(id: TreeId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
