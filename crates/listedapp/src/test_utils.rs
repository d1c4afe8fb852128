use crate::clock::FixedClock;
use crate::config::ListedConfig;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::repository::Repository;
use crate::ListedApi;
use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixed reference instant used across tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn mem_repo() -> Repository<MemBackend> {
    Repository::new(MemBackend::new())
}

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub api: ListedApi<FsBackend, FixedClock>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(ListedConfig::default())
    }

    pub fn with_config(config: ListedConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("data");
        let config = ListedConfig {
            data_dir: Some(root.clone()),
            ..config
        };
        let api = ListedApi::new(FsBackend::new(&root), FixedClock::new(t0()), config);
        Self {
            _temp_dir: temp_dir,
            api,
            root,
        }
    }

    /// A second API over the same directory, as after an app restart.
    pub fn reopen(&self) -> ListedApi<FsBackend, FixedClock> {
        ListedApi::new(
            FsBackend::new(&self.root),
            FixedClock::new(self.api.now()),
            self.api.config().clone(),
        )
    }
}
