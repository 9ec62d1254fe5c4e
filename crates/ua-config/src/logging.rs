//! Logging setup driven by [`LogConfig`]
//!
//! Log levels use the 0..=6 verbosity scale of the configuration records and
//! map onto tracing levels:
//!
//! | config level | tracing level |
//! |--------------|---------------|
//! | 0            | off           |
//! | 1            | ERROR         |
//! | 2            | WARN          |
//! | 3            | INFO          |
//! | 4            | DEBUG         |
//! | 5 and above  | TRACE         |
//!
//! `consoleLevel` limits what reaches stderr. When `filename` is set, the
//! log is also written to that file, limited by `level`. `RUST_LOG`, when
//! present, replaces the level-derived filter.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, writer::MakeWriterExt};
use tracing_subscriber::EnvFilter;

use crate::endpoint::LogConfig;
use crate::error::{UaError, UaResult};

/// Map a configuration log level to a tracing level; `None` means off
pub fn tracing_level(level: u32) -> Option<Level> {
    match level {
        0 => None,
        1 => Some(Level::ERROR),
        2 => Some(Level::WARN),
        3 => Some(Level::INFO),
        4 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// The most verbose level any configured sink wants to see
pub fn max_level(config: &LogConfig) -> LevelFilter {
    let console = LevelFilter::from(tracing_level(config.console_level));
    if config.filename.is_empty() {
        return console;
    }
    console.max(LevelFilter::from(tracing_level(config.level)))
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(max_level(config).into()))
}

fn passes(limit: Option<Level>, meta: &Metadata<'_>) -> bool {
    limit.is_some_and(|limit| *meta.level() <= limit)
}

fn open_log_file(config: &LogConfig) -> UaResult<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if config.appends() {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options
        .open(&config.filename)
        .map_err(|e| UaError::io(&config.filename, e))
}

/// Install the global tracing subscriber described by `config`.
///
/// Returns `Ok(true)` when the subscriber was installed and `Ok(false)` when
/// another subscriber was already in place, in which case nothing changes
/// and the log file is not touched. Failing to open the log file is an error.
pub fn setup_logging(config: &LogConfig) -> UaResult<bool> {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!(file = %config.filename, "Subscriber already installed, ignoring log config");
        return Ok(false);
    }

    let console = tracing_level(config.console_level);
    let console_writer = std::io::stderr.with_filter(move |meta: &Metadata<'_>| passes(console, meta));

    let result = if config.filename.is_empty() {
        fmt::Subscriber::builder()
            .with_env_filter(build_filter(config))
            .with_writer(console_writer)
            .try_init()
    } else {
        let file = open_log_file(config)?;
        let file_level = tracing_level(config.level);
        let file_writer =
            Mutex::new(file).with_filter(move |meta: &Metadata<'_>| passes(file_level, meta));

        fmt::Subscriber::builder()
            .with_env_filter(build_filter(config))
            .with_ansi(false)
            .with_writer(console_writer.and(file_writer))
            .try_init()
    };

    match result {
        Ok(()) => {
            tracing::debug!(
                console_level = config.console_level,
                level = config.level,
                file = %config.filename,
                "Logging initialized"
            );
            Ok(true)
        }
        Err(e) => {
            tracing::debug!("Keeping existing subscriber: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(tracing_level(0), None);
        assert_eq!(tracing_level(1), Some(Level::ERROR));
        assert_eq!(tracing_level(3), Some(Level::INFO));
        assert_eq!(tracing_level(4), Some(Level::DEBUG));
        assert_eq!(tracing_level(6), Some(Level::TRACE));
    }

    #[test]
    fn file_level_only_counts_when_a_file_is_set() {
        let mut config = LogConfig {
            level: 5,
            console_level: 2,
            ..Default::default()
        };
        assert_eq!(max_level(&config), LevelFilter::WARN);

        config.filename = "THE.LOG".to_string();
        assert_eq!(max_level(&config), LevelFilter::TRACE);

        config.console_level = 0;
        config.level = 0;
        assert_eq!(max_level(&config), LevelFilter::OFF);
    }

    #[test]
    fn unopenable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            filename: dir
                .path()
                .join("missing")
                .join("THE.LOG")
                .to_string_lossy()
                .into_owned(),
            ..Default::default()
        };
        assert!(matches!(open_log_file(&config), Err(UaError::Io { .. })));
    }

    #[test]
    fn append_flag_keeps_existing_content() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("THE.LOG");
        std::fs::write(&path, "earlier\n").unwrap();

        let mut config = LogConfig {
            filename: path.to_string_lossy().into_owned(),
            file_flags: LogConfig::APPEND,
            ..Default::default()
        };
        open_log_file(&config).unwrap().write_all(b"later\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\nlater\n");

        config.file_flags = 0;
        open_log_file(&config).unwrap().write_all(b"fresh\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }
}
