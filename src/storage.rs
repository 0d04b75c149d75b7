//! # State-File Persistence
//!
//! The planner itself never touches disk; this module is the key-value
//! collaborator it is loaded from and stored to. The state is a small JSON
//! document holding the six persisted fields — plan window, consumed total,
//! and daily goal. Derived values (the deficit and the `prev_*` pair) are
//! never written; they are recomputed on load.
//!
//! ## Defaults
//! A missing file, or individual missing keys, fall back to the stock
//! profile: an 08:00-21:00 window, nothing consumed, 2500 ml goal. Parse
//! errors are reported, not papered over, so a corrupted file is noticed.
//!
//! ## Atomicity
//! `store` writes the serialized state to a sibling `.tmp` file and renames
//! it over the target, so a crash mid-write leaves the previous state
//! intact rather than a truncated document.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or storing the state file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File read, write, or rename failed
    #[error("state file IO: {0}")]
    Io(#[from] io::Error),

    /// File exists but is not valid state JSON
    #[error("state file parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The persisted fields, with per-key defaults matching a fresh install.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default = "default_from_hour")]
    pub from_hour_of_day: i32,
    #[serde(default)]
    pub from_minute: i32,
    #[serde(default = "default_to_hour")]
    pub to_hour_of_day: i32,
    #[serde(default)]
    pub to_minute: i32,
    #[serde(default)]
    pub consumed_ml: i32,
    #[serde(default = "default_daily_plan")]
    pub daily_plan_ml: i32,
}

fn default_from_hour() -> i32 {
    8
}

fn default_to_hour() -> i32 {
    21
}

fn default_daily_plan() -> i32 {
    2500
}

impl Default for StoredState {
    fn default() -> Self {
        StoredState {
            from_hour_of_day: default_from_hour(),
            from_minute: 0,
            to_hour_of_day: default_to_hour(),
            to_minute: 0,
            consumed_ml: 0,
            daily_plan_ml: default_daily_plan(),
        }
    }
}

/// Handle to the JSON state file.
#[derive(Clone, Debug)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        StateFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted state, defaulting when the file does not exist.
    ///
    /// Missing keys inside an existing file take their per-key defaults;
    /// a malformed file is an error.
    pub fn load(&self) -> Result<StoredState, StorageError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredState::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    /// Store state, all-or-nothing.
    ///
    /// Writes to `<path>.tmp` then renames over the target.
    pub fn store(&self, state: &StoredState) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
