//! Tests for db::factory module - repository creation and configuration.

mod support;

use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use estate_rust::api::NewEstate;
use estate_rust::db::{RepositoryConfig, RepositoryFactory, RepositoryType};

const NO_BACKEND_ENV: &[(&str, Option<&str>)] = &[
    ("REPOSITORY_TYPE", None),
    ("DATABASE_URL", None),
    ("PG_DATABASE_URL", None),
];

fn write_config(dir: &Path, repo_type: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("repository.toml"),
        format!("[repository]\ntype = \"{}\"\n", repo_type),
    )
    .unwrap();
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(future)
}

#[test]
fn test_repository_type_from_str_postgres() {
    for raw in ["postgres", "POSTGRES", "pg"] {
        assert_eq!(RepositoryType::from_str(raw).unwrap(), RepositoryType::Postgres);
    }
}

#[test]
fn test_repository_type_from_str_local() {
    for raw in ["local", "LOCAL", "memory"] {
        assert_eq!(RepositoryType::from_str(raw).unwrap(), RepositoryType::Local);
    }
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("invalid");
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_from_env_with_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/test")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_repository_type_explicit_env_wins_over_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/test")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_unknown_env_falls_back_to_local() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("cassandra"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[tokio::test]
async fn test_create_local_repository_is_usable() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();

    assert!(repo.health_check().await.unwrap());
    let estate = repo.create_estate(&NewEstate::new(3, 4)).await.unwrap();
    assert_eq!(repo.get_estate(estate.id).await.unwrap(), estate);
}

#[tokio::test]
async fn test_create_postgres_without_config_fails() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    let err = result.err().expect("postgres without config must fail");
    assert!(!err.is_not_found());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_from_config_file_local() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path())
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_from_config_file_unknown_type_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"sqlite\"").unwrap();

    let result = RepositoryFactory::from_config_file(file.path()).await;
    let err = result.err().expect("unknown backend must fail");
    assert!(err.to_string().contains("Invalid repository type"));
}

#[tokio::test]
async fn test_from_config_file_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = RepositoryFactory::from_config_file(dir.path().join("repository.toml")).await;
    assert!(result.is_err());
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_postgres_config_file_requires_feature() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[repository]\ntype = \"postgres\"\n\n[postgres]\ndatabase_url = \"postgres://localhost/estates\""
    )
    .unwrap();

    let result = RepositoryFactory::from_config_file(file.path()).await;
    let err = result.err().expect("postgres is compiled out");
    assert!(err.to_string().contains("not enabled"));
}

#[test]
fn test_locate_finds_repository_toml_in_cwd() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "local");

    support::with_scoped_cwd(dir.path(), NO_BACKEND_ENV, || {
        assert_eq!(
            RepositoryConfig::locate().as_deref(),
            Some(Path::new("repository.toml"))
        );
        let config = RepositoryConfig::from_default_location().unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    });
}

#[test]
fn test_locate_falls_back_to_params_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir.path().join("params"), "memory");

    support::with_scoped_cwd(dir.path(), NO_BACKEND_ENV, || {
        assert_eq!(
            RepositoryConfig::locate().as_deref(),
            Some(Path::new("params/repository.toml"))
        );
    });
}

#[test]
fn test_startup_reads_default_config_when_env_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "sqlite");

    support::with_scoped_cwd(dir.path(), NO_BACKEND_ENV, || {
        let result = block_on(RepositoryFactory::from_env_or_default_config());
        let err = result.err().expect("the file names an unknown backend");
        assert!(err.to_string().contains("Invalid repository type"));
    });
}

#[test]
fn test_startup_env_selection_wins_over_default_config() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "sqlite");

    support::with_scoped_cwd(
        dir.path(),
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            let repo = block_on(RepositoryFactory::from_env_or_default_config()).unwrap();
            assert!(block_on(repo.health_check()).unwrap());
        },
    );
}

#[test]
fn test_startup_without_env_or_config_is_local() {
    let dir = tempfile::tempdir().unwrap();

    support::with_scoped_cwd(dir.path(), NO_BACKEND_ENV, || {
        assert!(RepositoryConfig::locate().is_none());
        let repo = block_on(RepositoryFactory::from_env_or_default_config()).unwrap();
        assert!(block_on(repo.health_check()).unwrap());
    });
}
