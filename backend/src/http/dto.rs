//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies map one-to-one onto the values produced by the service
//! layer; nothing is recomputed here.

use serde::{Deserialize, Serialize};

use crate::api::{EstateId, NewEstate, NewTree, TreeId};

pub use crate::api::{DronePlan, EstateStats};

/// Request body for creating an estate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateEstateRequest {
    pub length: i32,
    pub width: i32,
}

impl From<CreateEstateRequest> for NewEstate {
    fn from(req: CreateEstateRequest) -> Self {
        NewEstate::new(req.length, req.width)
    }
}

/// Response for estate creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEstateResponse {
    pub id: EstateId,
}

/// Request body for planting a tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateTreeRequest {
    pub x: i32,
    pub y: i32,
    pub height: i32,
}

impl From<CreateTreeRequest> for NewTree {
    fn from(req: CreateTreeRequest) -> Self {
        NewTree::new(req.x, req.y, req.height)
    }
}

/// Response for tree creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTreeResponse {
    pub id: TreeId,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
