use clap::Parser;
use log::{error, info, warn};

use galaxy_conquest::{app, cli::Args, config::GameConfig, logging};

fn main() {
    let args = Args::parse();

    let (mut config, config_error) = GameConfig::load_or_default(&args.config);
    config.apply_overrides(&args);

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    if let Some(e) = config_error {
        warn!("{}; using default settings", e);
    }
    info!("Starting Galaxy Conquest");

    if let Err(e) = app::run(config) {
        error!("Game crashed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    info!("Game closed normally");
}
