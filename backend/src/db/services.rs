//! High-level service layer for estate operations.
//!
//! These functions work with any repository implementation and hold the
//! sequencing that must stay identical across backends: validate the input,
//! load the estate, run the placement check or calculator, persist.
//!
//! Every failure is reported as a [`ServiceError`] with one of three
//! outcomes the request layer maps to a status code. Nothing is retried here.

use log::{debug, info, warn};

use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::api::{DronePlan, EstateId, EstateStats, NewEstate, NewTree, TreeId};
use crate::services::{compute_drone_plan, compute_stats, validate_placement};

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a failed estate operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request itself is wrong: out-of-range fields or a tree placed
    /// outside its estate.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The referenced estate does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage failed.
    #[error("Internal error: {0}")]
    Internal(#[source] RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { message, .. } => ServiceError::NotFound(message),
            other => ServiceError::Internal(other),
        }
    }
}

/// Check if the database connection is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Validate and store a new estate, returning its generated id.
pub async fn create_estate<R: FullRepository + ?Sized>(
    repo: &R,
    estate: NewEstate,
) -> ServiceResult<EstateId> {
    estate.validate().map_err(ServiceError::InvalidInput)?;

    let stored = repo.create_estate(&estate).await.map_err(|e| {
        warn!("Failed to create estate {}x{}: {}", estate.length, estate.width, e);
        ServiceError::from(e)
    })?;

    info!(
        "Created estate {} ({}x{})",
        stored.id, stored.length, stored.width
    );
    Ok(stored.id)
}

/// Validate and store a new tree on an existing estate.
///
/// The order matters: field ranges first, then the estate lookup, then the
/// placement check against the estate's dimensions.
pub async fn create_tree<R: FullRepository + ?Sized>(
    repo: &R,
    estate_id: EstateId,
    tree: NewTree,
) -> ServiceResult<TreeId> {
    tree.validate().map_err(ServiceError::InvalidInput)?;

    let estate = repo.get_estate(estate_id).await?;

    if !validate_placement(estate.length, estate.width, tree.x, tree.y) {
        debug!(
            "Rejected tree at ({}, {}) on estate {} ({}x{})",
            tree.x, tree.y, estate.id, estate.length, estate.width
        );
        return Err(ServiceError::InvalidInput(format!(
            "Tree position ({}, {}) is outside the estate ({}x{})",
            tree.x, tree.y, estate.length, estate.width
        )));
    }

    let stored = repo.create_tree(estate.id, &tree).await.map_err(|e| {
        warn!("Failed to create tree on estate {}: {}", estate.id, e);
        ServiceError::from(e)
    })?;

    info!(
        "Planted tree {} at ({}, {}) on estate {}",
        stored.id, stored.x, stored.y, estate.id
    );
    Ok(stored.id)
}

/// Height statistics for the trees of an estate.
pub async fn get_estate_stats<R: FullRepository + ?Sized>(
    repo: &R,
    estate_id: EstateId,
) -> ServiceResult<EstateStats> {
    let estate = repo.get_estate(estate_id).await?;
    let heights = repo.get_tree_heights(estate.id).await?;
    Ok(compute_stats(&heights))
}

/// Total drone travel distance over an estate.
pub async fn get_drone_plan<R: FullRepository + ?Sized>(
    repo: &R,
    estate_id: EstateId,
) -> ServiceResult<DronePlan> {
    let estate = repo.get_estate(estate_id).await?;
    let trees = repo.get_trees(estate.id).await?;
    let plan = compute_drone_plan(estate.length, estate.width, &trees);
    debug!(
        "Drone plan for estate {} over {} trees: {}m",
        estate.id,
        trees.len(),
        plan.distance
    );
    Ok(plan)
}
