//! Game configuration.
//!
//! Settings come from three layers: built-in defaults, an optional TOML file
//! and command-line overrides. Every TOML key is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;
use crate::galaxy::{Bounds, MAX_PLACEMENT_ATTEMPTS};

pub const DEFAULT_CONFIG_PATH: &str = "config/prefs.toml";

/// Upper bound for logical screen dimensions.
pub const MAX_SCREEN_SIZE: u32 = 16_384;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Show the debug overlay at startup
    pub enabled: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// DEBUG, INFO, WARNING, ERROR or CRITICAL
    pub level: String,
    /// chrono format string for the timestamp column
    pub date_format: String,
    /// Log file; the terminal is owned by the game while it runs
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            file: PathBuf::from("galaxy_conquest.log"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Logical screen width in logical pixels
    pub screen_width: u32,
    /// Logical screen height in logical pixels
    pub screen_height: u32,
    pub fps: u32,
    pub info_panel_width: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fps: 60,
            info_panel_width: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxySettings {
    pub num_star_systems: usize,
    pub num_background_stars: usize,
    pub num_nebulae: usize,
    /// Minimum distance of system centres from the galaxy edges
    pub margin: i32,
    pub max_placement_attempts: usize,
    /// Fixed generation seed; random when absent
    pub seed: Option<u64>,
}

impl Default for GalaxySettings {
    fn default() -> Self {
        Self {
            num_star_systems: 10,
            num_background_stars: 200,
            num_nebulae: 3,
            margin: 100,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveSettings {
    pub directory: PathBuf,
    /// Zero disables the timed autosave
    pub autosave_interval_secs: u64,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(crate::persistence::DEFAULT_SAVE_DIR),
            autosave_interval_secs: 300,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub debug: DebugSettings,
    pub logging: LoggingSettings,
    /// Older config files call this section `[game]`
    #[serde(alias = "game")]
    pub display: DisplaySettings,
    pub galaxy: GalaxySettings,
    pub saves: SaveSettings,
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: GameConfig = toml::from_str(text)?;
        config.sanitize();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path`, falling back to defaults.
    ///
    /// A missing file is not an error. Any other failure is returned next to
    /// the defaults so the caller can report it once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Command-line flags win over file values.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(enabled) = args.debug {
            self.debug.enabled = enabled;
        }
        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
        if let Some(width) = args.screen_width {
            self.display.screen_width = width;
        }
        if let Some(height) = args.screen_height {
            self.display.screen_height = height;
        }
        if let Some(fps) = args.fps {
            self.display.fps = fps;
        }
        if let Some(count) = args.num_star_systems {
            self.galaxy.num_star_systems = count;
        }
        if let Some(count) = args.num_background_stars {
            self.galaxy.num_background_stars = count;
        }
        if let Some(count) = args.num_nebulae {
            self.galaxy.num_nebulae = count;
        }
        if let Some(seed) = args.seed {
            self.galaxy.seed = Some(seed);
        }
        if let Some(ref dir) = args.save_dir {
            self.saves.directory = dir.clone();
        }
        self.sanitize();
    }

    /// Clamp values that would make the layout or frame loop unusable.
    pub fn sanitize(&mut self) {
        let display = &mut self.display;
        display.fps = display.fps.clamp(1, 240);
        display.info_panel_width = display.info_panel_width.clamp(100, MAX_SCREEN_SIZE - 100);
        display.screen_width = display
            .screen_width
            .clamp(display.info_panel_width.saturating_add(100), MAX_SCREEN_SIZE);
        display.screen_height = display.screen_height.clamp(200, MAX_SCREEN_SIZE);
        self.galaxy.margin = self.galaxy.margin.max(0);
    }

    /// Whole logical screen.
    pub fn screen_bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.display.screen_width as i32, self.display.screen_height as i32)
    }

    /// Area left of the info panel where the galaxy is laid out.
    pub fn galaxy_bounds(&self) -> Bounds {
        Bounds::new(
            0,
            0,
            self.display.screen_width.saturating_sub(self.display.info_panel_width) as i32,
            self.display.screen_height as i32,
        )
    }

    pub fn info_panel_bounds(&self) -> Bounds {
        let galaxy = self.galaxy_bounds();
        Bounds::new(
            galaxy.right(),
            0,
            self.display.info_panel_width as i32,
            self.display.screen_height as i32,
        )
    }
}
