//! Logging setup
//!
//! The terminal UI owns the screen, so log records go to a file instead of
//! stderr. `RUST_LOG` overrides the level passed on the command line.

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

pub fn init(log_file: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {:?}", log_file))?;

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unwritable_log_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("snake.log");

        assert!(init(&path, LevelFilter::Info).is_err());
    }
}
