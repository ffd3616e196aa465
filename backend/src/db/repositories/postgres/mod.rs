//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures on reads
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::DatabaseErrorKind;
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, warn};
use std::time::Duration;
use tokio::task;

use crate::api::{Estate, EstateId, NewEstate, NewTree, Tree};
use crate::db::repository::{
    ErrorContext, EstateRepository, RepositoryError, RepositoryResult, TreeRepository,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the variables read and their defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Whether a failed query may be run again on a fresh connection.
///
/// Pool checkout failures are always retried since no statement reached the
/// server. Inserts must not be replayed: the connection can drop after the
/// server committed, and a second run would store a duplicate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryRetry {
    /// Re-run the query on retryable errors (reads).
    Retryable,
    /// Run the query at most once (writes).
    Never,
}

/// Retry policy used by `create_estate` and `create_tree`.
pub(crate) const INSERT_RETRY: QueryRetry = QueryRetry::Never;

impl QueryRetry {
    pub(crate) fn allows(self, err: &RepositoryError, attempt: u32, max_retries: u32) -> bool {
        self == QueryRetry::Retryable && err.is_retryable() && attempt < max_retries
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a read on a blocking thread, retrying transient failures with
    /// exponential backoff up to `max_retries` times.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        self.run(QueryRetry::Retryable, f).await
    }

    async fn run<T, F>(&self, policy: QueryRetry, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::from(e).with_operation("get_connection");
                        if attempt < max_retries {
                            warn!("Connection attempt {} failed: {}", attempt + 1, err);
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if policy.allows(&e, attempt, max_retries) => {
                        warn!("Retryable query failure on attempt {}: {}", attempt + 1, e);
                        last_error = Some(e);
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

fn no_rows_inserted(operation: &str, entity: &str) -> RepositoryError {
    RepositoryError::internal_with_context(
        "Insert affected no rows",
        ErrorContext::new(operation).with_entity(entity),
    )
}

#[async_trait]
impl EstateRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn create_estate(&self, estate: &NewEstate) -> RepositoryResult<Estate> {
        let row = NewEstateRow {
            length: estate.length,
            width: estate.width,
        };
        self.run(INSERT_RETRY, move |conn| {
            let inserted: Option<EstateRow> = diesel::insert_into(estates::table)
                .values(&row)
                .returning(EstateRow::as_returning())
                .get_result(conn)
                .optional()
                .map_err(|e| map_diesel_error(e).with_operation("create_estate"))?;

            let inserted = inserted.ok_or_else(|| no_rows_inserted("create_estate", "estate"))?;
            debug!("Inserted estate {}", inserted.id);
            Ok(inserted.into())
        })
        .await
    }

    async fn get_estate(&self, estate_id: EstateId) -> RepositoryResult<Estate> {
        self.with_conn(move |conn| {
            estates::table
                .filter(estates::id.eq(estate_id.0))
                .select(EstateRow::as_select())
                .first::<EstateRow>(conn)
                .optional()
                .map_err(|e| map_diesel_error(e).with_operation("get_estate"))?
                .map(Estate::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        format!("Estate {} not found", estate_id),
                        ErrorContext::new("get_estate")
                            .with_entity("estate")
                            .with_entity_id(estate_id),
                    )
                })
        })
        .await
    }
}

#[async_trait]
impl TreeRepository for PostgresRepository {
    async fn create_tree(&self, estate_id: EstateId, tree: &NewTree) -> RepositoryResult<Tree> {
        let row = NewTreeRow {
            estate_id: estate_id.0,
            x: tree.x,
            y: tree.y,
            height: tree.height,
        };
        self.run(INSERT_RETRY, move |conn| {
            let inserted: Option<TreeRow> = diesel::insert_into(trees::table)
                .values(&row)
                .returning(TreeRow::as_returning())
                .get_result(conn)
                .optional()
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        DatabaseErrorKind::ForeignKeyViolation,
                        _,
                    ) => RepositoryError::not_found_with_context(
                        format!("Estate {} not found", estate_id),
                        ErrorContext::new("create_tree")
                            .with_entity("estate")
                            .with_entity_id(estate_id),
                    ),
                    other => map_diesel_error(other).with_operation("create_tree"),
                })?;

            let inserted = inserted.ok_or_else(|| no_rows_inserted("create_tree", "tree"))?;
            debug!("Inserted tree {} on estate {}", inserted.id, estate_id);
            Ok(inserted.into())
        })
        .await
    }

    async fn get_tree_heights(&self, estate_id: EstateId) -> RepositoryResult<Vec<i32>> {
        self.with_conn(move |conn| {
            trees::table
                .filter(trees::estate_id.eq(estate_id.0))
                .select(trees::height)
                .order(trees::height.asc())
                .load::<i32>(conn)
                .map_err(|e| map_diesel_error(e).with_operation("get_tree_heights"))
        })
        .await
    }

    async fn get_trees(&self, estate_id: EstateId) -> RepositoryResult<Vec<Tree>> {
        self.with_conn(move |conn| {
            let rows = trees::table
                .filter(trees::estate_id.eq(estate_id.0))
                .select(TreeRow::as_select())
                .order(trees::created_at.asc())
                .load::<TreeRow>(conn)
                .map_err(|e| map_diesel_error(e).with_operation("get_trees"))?;

            Ok(rows.into_iter().map(Tree::from).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PostgresConfig::default();
        assert!(config.database_url.is_empty());
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.min_pool_size, 1);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_with_url_keeps_defaults() {
        let config = PostgresConfig::with_url("postgres://localhost/estates");
        assert_eq!(config.database_url, "postgres://localhost/estates");
        assert_eq!(config.retry_delay_ms, 100);
    }

    fn closed_connection() -> RepositoryError {
        RepositoryError::from(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection unexpectedly".to_string()),
        ))
    }

    #[test]
    fn test_inserts_never_rerun_a_query() {
        let err = closed_connection();
        assert!(err.is_retryable());

        for attempt in 0..3 {
            assert!(!INSERT_RETRY.allows(&err, attempt, 3));
        }
    }

    #[test]
    fn test_reads_rerun_retryable_queries_until_exhausted() {
        let err = closed_connection();
        assert!(QueryRetry::Retryable.allows(&err, 0, 3));
        assert!(QueryRetry::Retryable.allows(&err, 2, 3));
        assert!(!QueryRetry::Retryable.allows(&err, 3, 3));

        let constraint = RepositoryError::query("check constraint violated");
        assert!(!QueryRetry::Retryable.allows(&constraint, 0, 3));
    }

    #[test]
    fn test_pool_checkout_failure_is_timeout() {
        let manager = ConnectionManager::<PgConnection>::new("postgres://nobody@127.0.0.1:1/none");
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(200))
            .build_unchecked(manager);

        let err = RepositoryError::from(pool.get().err().expect("nothing listens on port 1"));
        assert!(matches!(err, RepositoryError::TimeoutError { .. }));
        assert!(err.is_retryable());
    }
}
