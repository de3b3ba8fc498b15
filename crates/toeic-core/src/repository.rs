//! Persistence for the tracker state
//!
//! The whole state is one JSON blob: `{"state": {...}, "version": N}`.
//! It is read once when the store opens and rewritten after every mutation.

use crate::{AppState, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the state blob
pub const STORAGE_NAME: &str = "toeic-master-storage";

/// Current layout version of the state blob
pub const STATE_VERSION: u32 = 0;

/// The blob as written to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub state: AppState,
    pub version: u32,
}

impl PersistedState {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            version: STATE_VERSION,
        }
    }
}

/// Where the state blob lives
pub trait Repository {
    /// Read the stored blob, `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<PersistedState>>;

    /// Replace the stored blob
    fn save(&self, state: &PersistedState) -> Result<()>;
}

/// Single JSON file in the data directory
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Repository at `<dir>/toeic-master-storage.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{}.json", STORAGE_NAME)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, state)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process repository, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryRepository {
    blob: RefCell<Option<String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with a raw blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }

    /// The raw blob last written
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Result<Option<PersistedState>> {
        match self.blob.borrow().as_deref() {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        *self.blob.borrow_mut() = Some(serde_json::to_string(state)?);
        Ok(())
    }
}

impl<R: Repository + ?Sized> Repository for &R {
    fn load(&self) -> Result<Option<PersistedState>> {
        (**self).load()
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        (**self).save(state)
    }
}
