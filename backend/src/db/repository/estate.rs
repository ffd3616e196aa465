//! Estate repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Estate, EstateId, NewEstate};

/// Repository trait for estate records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait EstateRepository: Send + Sync {
    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Persist a new estate and return it with its generated identifier.
    ///
    /// The insert is atomic: either the full record is stored or nothing is.
    async fn create_estate(&self, estate: &NewEstate) -> RepositoryResult<Estate>;

    /// Retrieve an estate by ID.
    ///
    /// # Returns
    /// * `Ok(Estate)` - The stored estate
    /// * `Err(RepositoryError::NotFound)` - If the estate doesn't exist
    /// * `Err(RepositoryError)` - If the operation fails
    async fn get_estate(&self, estate_id: EstateId) -> RepositoryResult<Estate>;
}
