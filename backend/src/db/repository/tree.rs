//! Tree repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{EstateId, NewTree, Tree};

/// Repository trait for trees planted on estates.
///
/// Trees reference their estate by id; callers check the estate exists and
/// that the tree fits on it before calling [`TreeRepository::create_tree`].
#[async_trait]
pub trait TreeRepository: Send + Sync {
    /// Persist a new tree on the given estate.
    async fn create_tree(&self, estate_id: EstateId, tree: &NewTree) -> RepositoryResult<Tree>;

    /// Heights of all trees on an estate, sorted ascending.
    async fn get_tree_heights(&self, estate_id: EstateId) -> RepositoryResult<Vec<i32>>;

    /// All trees on an estate.
    async fn get_trees(&self, estate_id: EstateId) -> RepositoryResult<Vec<Tree>>;
}
