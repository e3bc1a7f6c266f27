use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug, Clone)]
#[command(name = "galaxy_conquest")]
#[command(about = "Explore a procedurally generated galaxy of star systems and planets")]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Show the debug overlay (true/false)
    #[arg(long)]
    pub debug: Option<bool>,

    /// Log level: DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long)]
    pub log_level: Option<String>,

    /// Logical screen width
    #[arg(long)]
    pub screen_width: Option<u32>,

    /// Logical screen height
    #[arg(long)]
    pub screen_height: Option<u32>,

    /// Frame rate cap
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of star systems to place
    #[arg(long)]
    pub num_star_systems: Option<usize>,

    /// Number of twinkling background stars
    #[arg(long)]
    pub num_background_stars: Option<usize>,

    /// Number of background nebulae
    #[arg(long)]
    pub num_nebulae: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory holding the save slot
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}
