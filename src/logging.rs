//! File logging behind the `log` facade, built on env_logger.
//!
//! The terminal belongs to the game surface while it runs, so log records go
//! to a file as `date - target - LEVEL - message` lines.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};
use thiserror::Error;

use crate::config::LoggingSettings;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("logger already installed")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Map a level name to a filter. `WARNING` and `CRITICAL` are accepted.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => Some(LevelFilter::Debug),
        "INFO" => Some(LevelFilter::Info),
        "WARNING" | "WARN" => Some(LevelFilter::Warn),
        "ERROR" | "CRITICAL" => Some(LevelFilter::Error),
        "TRACE" => Some(LevelFilter::Trace),
        "OFF" => Some(LevelFilter::Off),
        _ => None,
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

pub fn format_line(time: DateTime<Local>, date_format: &str, target: &str, level: Level, message: &str) -> String {
    format!("{} - {} - {} - {}", time.format(date_format), target, level_name(level), message)
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open_error = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(open_error)?;
    }
    OpenOptions::new().create(true).append(true).open(path).map_err(open_error)
}

/// env_logger builder writing formatted lines to the configured file.
pub fn builder(settings: &LoggingSettings, level: LevelFilter) -> Result<Builder, LoggingError> {
    let file = open_log_file(&settings.file)?;
    let date_format = settings.date_format.clone();
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .format(move |buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(
                    Local::now(),
                    &date_format,
                    record.target(),
                    record.level(),
                    &record.args().to_string(),
                )
            )
        });
    Ok(builder)
}

/// Install the file logger as the global logger.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let level = match parse_level(&settings.level) {
        Some(level) => level,
        None => {
            eprintln!("Warning: unknown log level '{}', using INFO", settings.level);
            LevelFilter::Info
        }
    };
    builder(settings, level)?.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use log::{Log, Record};

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("INFO"), Some(LevelFilter::Info));
        assert_eq!(parse_level("Warning"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("CRITICAL"), Some(LevelFilter::Error));
        assert_eq!(parse_level(" error "), Some(LevelFilter::Error));
        assert_eq!(parse_level("LOUD"), None);
    }

    #[test]
    fn test_format_line() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let line = format_line(time, "%Y-%m-%d %H:%M:%S", "galaxy_conquest::game", Level::Warn, "Autosave failed");
        assert_eq!(line, "2024-03-09 14:05:07 - galaxy_conquest::game - WARNING - Autosave failed");
    }

    #[test]
    fn test_logger_writes_enabled_records_to_file() {
        let path = std::env::temp_dir().join(format!("galaxy_conquest_log_{}.log", std::process::id()));
        let _ = fs::remove_file(&path);
        let settings = LoggingSettings {
            file: path.clone(),
            ..LoggingSettings::default()
        };
        let logger = builder(&settings, LevelFilter::Info).unwrap().build();

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("galaxy")
                .args(format_args!("Generated 3 star systems"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("galaxy")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.flush();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(" - galaxy - INFO - Generated 3 star systems"));
        assert!(!text.contains("hidden"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_init_installs_global_logger_once() {
        let path = std::env::temp_dir().join(format!("galaxy_conquest_init_{}.log", std::process::id()));
        let settings = LoggingSettings {
            file: path.clone(),
            level: "debug".to_string(),
            ..LoggingSettings::default()
        };
        let _ = init(&settings);
        assert!(matches!(init(&settings), Err(LoggingError::AlreadySet(_))));
        let _ = fs::remove_file(&path);
    }
}
