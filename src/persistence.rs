//! Persistence collaborator for the "current settings" record.

use anyhow::{Context, Result};
use log::error;
use std::path::PathBuf;

/// Stores at most one opaque record describing the active display override.
///
/// Failures are reported as `false`/`None` so the engine can branch on them
/// without unwinding.
pub trait PersistenceStore {
    /// The currently persisted record, if any.
    fn current(&self) -> Option<Vec<u8>>;

    /// Persist `record`, or clear the store when `None`. Returns false when
    /// the new state could not be made durable.
    fn persist(&mut self, record: Option<&[u8]>) -> bool;
}

/// In-memory store, for tests and embedders that persist elsewhere.
#[derive(Debug, Default, Clone)]
pub struct MemoryPersistence {
    record: Option<Vec<u8>>,
}

impl PersistenceStore for MemoryPersistence {
    fn current(&self) -> Option<Vec<u8>> {
        self.record.clone()
    }

    fn persist(&mut self, record: Option<&[u8]>) -> bool {
        self.record = record.map(<[u8]>::to_vec);
        true
    }
}

/// File-backed store; clearing removes the file.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FilePersistence { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn try_write(&self, record: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        std::fs::write(&self.path, record)
            .with_context(|| format!("Failed to write {:?}", self.path))
    }

    fn try_clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to remove {:?}", self.path)),
        }
    }
}

impl PersistenceStore for FilePersistence {
    fn current(&self) -> Option<Vec<u8>> {
        match std::fs::read(&self.path) {
            Ok(record) => Some(record),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("Failed to read persisted settings {:?}: {err}", self.path);
                None
            }
        }
    }

    fn persist(&mut self, record: Option<&[u8]>) -> bool {
        let result = match record {
            Some(record) => self.try_write(record),
            None => self.try_clear(),
        };

        if let Err(err) = result {
            error!("Failed to persist settings: {err:#}");
            return false;
        }
        true
    }
}
