use super::{Collection, EntityStore};
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend: one `<key>.json` file per collection under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.key()))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl EntityStore for FsBackend {
    fn get(&self, collection: Collection) -> Result<Option<String>, StoreError> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(content))
    }

    fn set(&self, collection: Collection, value: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let target = self.collection_path(collection);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", collection.key(), Uuid::new_v4()));
        fs::write(&tmp, value)?;
        if let Err(err) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}
