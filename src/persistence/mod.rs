//! Game persistence - JSON save/load of the galaxy.
//!
//! A single autosave slot under a fixed directory. Quick saves, menu saves and
//! timed autosaves all write the same file.

pub mod records;
pub mod store;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use records::{create_save_data, parse_save, restore_galaxy, LoadedGame, SaveFile, SAVE_VERSION};
pub use store::{SaveStore, AUTOSAVE_FILENAME, DEFAULT_SAVE_DIR};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("star system {name} lies outside the map at ({x}, {y})")]
    OutOfRange { name: String, x: i32, y: i32 },
}
