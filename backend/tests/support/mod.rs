#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use estate_rust::api::{EstateId, NewEstate, NewTree};
use estate_rust::db::{EstateRepository, LocalRepository, TreeRepository};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests in one binary run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Like [`with_scoped_env`], with the working directory switched to `dir`.
pub fn with_scoped_cwd<F, R>(dir: &Path, changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _env = ScopedEnv::new(changes);
    let _cwd = ScopedCwd::new(dir);
    f()
}

struct ScopedCwd {
    previous: PathBuf,
}

impl ScopedCwd {
    fn new(dir: &Path) -> Self {
        let previous = std::env::current_dir().expect("current dir");
        std::env::set_current_dir(dir).expect("enter scoped cwd");
        Self { previous }
    }
}

impl Drop for ScopedCwd {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Fresh in-memory repository shared behind an `Arc`.
pub fn local_repo() -> Arc<LocalRepository> {
    Arc::new(LocalRepository::new())
}

/// Store an estate directly through the repository, bypassing the services.
pub async fn seed_estate(repo: &LocalRepository, length: i32, width: i32) -> EstateId {
    repo.create_estate(&NewEstate::new(length, width))
        .await
        .expect("seed estate")
        .id
}

/// Store trees given as `(x, y, height)` on an existing estate.
pub async fn seed_trees(repo: &LocalRepository, estate_id: EstateId, trees: &[(i32, i32, i32)]) {
    for &(x, y, height) in trees {
        repo.create_tree(estate_id, &NewTree::new(x, y, height))
            .await
            .expect("seed tree");
    }
}
