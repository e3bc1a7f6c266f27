use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::galaxy::Galaxy;

use super::records::{create_save_data, parse_save, LoadedGame};
use super::PersistenceError;

pub const DEFAULT_SAVE_DIR: &str = "saves";
pub const AUTOSAVE_FILENAME: &str = "autosave.json";

/// The single save slot on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
    filename: String,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filename: AUTOSAVE_FILENAME.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Write the galaxy to the slot, creating the save directory if needed.
    pub fn save(&self, galaxy: &Galaxy, selected_system: Option<&str>) -> Result<PathBuf, PersistenceError> {
        let path = self.path();
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let save = create_save_data(galaxy, selected_system);
        let json = serde_json::to_string_pretty(&save)?;
        fs::write(&path, json).map_err(|source| PersistenceError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Saved {} star systems to {}", galaxy.len(), path.display());
        Ok(path)
    }

    /// Read the slot. Nothing is modified on failure.
    pub fn load(&self) -> Result<LoadedGame, PersistenceError> {
        let path = self.path();
        let json = fs::read_to_string(&path).map_err(|source| PersistenceError::Io {
            path: path.clone(),
            source,
        })?;
        let loaded = parse_save(&json)?;
        debug!("Loaded {} star systems from {}", loaded.galaxy.len(), path.display());
        Ok(loaded)
    }
}
