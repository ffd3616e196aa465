//! In-memory local repository implementation.
//!
//! All data lives in hash maps behind a single lock, which gives fast,
//! deterministic and isolated execution for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{Estate, EstateId, NewEstate, NewTree, Tree, TreeId};
use crate::db::repository::*;

/// In-memory local repository.
///
/// # Example
/// ```
/// use estate_rust::api::NewEstate;
/// use estate_rust::db::repositories::LocalRepository;
/// use estate_rust::db::repository::EstateRepository;
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new();
/// let estate = repo.create_estate(&NewEstate::new(10, 20)).await.unwrap();
/// assert_eq!(repo.estate_count(), 1);
/// assert_eq!(estate.length, 10);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    estates: HashMap<EstateId, Estate>,
    // Trees grouped by owning estate, in insertion order
    trees: HashMap<EstateId, Vec<Tree>>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            estates: HashMap::new(),
            trees: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of estates stored.
    pub fn estate_count(&self) -> usize {
        self.data.read().estates.len()
    }

    /// Get the number of trees stored across all estates.
    pub fn tree_count(&self) -> usize {
        self.data.read().trees.values().map(Vec::len).sum()
    }

    /// Check if an estate exists.
    pub fn has_estate(&self, estate_id: EstateId) -> bool {
        self.data.read().estates.contains_key(&estate_id)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }

    fn estate_not_found(estate_id: EstateId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Estate {} not found", estate_id),
            ErrorContext::new(operation)
                .with_entity("estate")
                .with_entity_id(estate_id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EstateRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create_estate(&self, estate: &NewEstate) -> RepositoryResult<Estate> {
        self.check_health("create_estate")?;

        let stored = Estate {
            id: EstateId::generate(),
            length: estate.length,
            width: estate.width,
            created_at: Utc::now(),
        };

        self.data.write().estates.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_estate(&self, estate_id: EstateId) -> RepositoryResult<Estate> {
        self.check_health("get_estate")?;

        self.data
            .read()
            .estates
            .get(&estate_id)
            .cloned()
            .ok_or_else(|| Self::estate_not_found(estate_id, "get_estate"))
    }
}

#[async_trait]
impl TreeRepository for LocalRepository {
    async fn create_tree(&self, estate_id: EstateId, tree: &NewTree) -> RepositoryResult<Tree> {
        self.check_health("create_tree")?;

        let mut data = self.data.write();
        // Same guarantee as the foreign key in the Postgres schema
        if !data.estates.contains_key(&estate_id) {
            return Err(Self::estate_not_found(estate_id, "create_tree"));
        }

        let stored = Tree {
            id: TreeId::generate(),
            estate_id,
            x: tree.x,
            y: tree.y,
            height: tree.height,
            created_at: Utc::now(),
        };
        data.trees.entry(estate_id).or_default().push(stored.clone());
        Ok(stored)
    }

    async fn get_tree_heights(&self, estate_id: EstateId) -> RepositoryResult<Vec<i32>> {
        self.check_health("get_tree_heights")?;

        let mut heights: Vec<i32> = self
            .data
            .read()
            .trees
            .get(&estate_id)
            .map(|trees| trees.iter().map(|t| t.height).collect())
            .unwrap_or_default();
        heights.sort_unstable();
        Ok(heights)
    }

    async fn get_trees(&self, estate_id: EstateId) -> RepositoryResult<Vec<Tree>> {
        self.check_health("get_trees")?;

        Ok(self
            .data
            .read()
            .trees
            .get(&estate_id)
            .cloned()
            .unwrap_or_default())
    }
}
