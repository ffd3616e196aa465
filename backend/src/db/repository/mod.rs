//! Repository trait definitions for the storage collaborator.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`estate`]: Estate creation and lookup, plus connection health
//! - [`tree`]: Tree creation and per-estate tree queries
//!
//! # Convenience Trait Bound
//!
//! Services that need both halves take a [`FullRepository`]:
//!
//! ```ignore
//! async fn plan<R: FullRepository + ?Sized>(repo: &R, id: EstateId) -> RepositoryResult<()> {
//!     let estate = repo.get_estate(id).await?;
//!     let trees = repo.get_trees(estate.id).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod estate;
pub mod tree;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use estate::EstateRepository;
pub use tree::TreeRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: EstateRepository + TreeRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: EstateRepository + TreeRepository {}
