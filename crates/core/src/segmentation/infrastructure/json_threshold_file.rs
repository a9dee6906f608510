use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::segmentation::domain::threshold_source::ThresholdSource;
use crate::shared::threshold_config::ThresholdConfig;

#[derive(Error, Debug)]
pub enum ThresholdFileError {
    #[error("failed to read thresholds from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid threshold JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid thresholds in {path}: {reason}")]
    OutOfRange { path: PathBuf, reason: String },
}

/// Loads and validates a threshold file once.
pub fn load(path: &Path) -> Result<ThresholdConfig, ThresholdFileError> {
    let json = fs::read_to_string(path).map_err(|source| ThresholdFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: ThresholdConfig =
        serde_json::from_str(&json).map_err(|source| ThresholdFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    cfg.validate()
        .map_err(|reason| ThresholdFileError::OutOfRange {
            path: path.to_path_buf(),
            reason,
        })?;
    Ok(cfg)
}

/// Threshold source backed by a JSON file that an operator may edit while
/// frames are being processed.
///
/// The file is re-read whenever its modification time changes. A file that
/// fails to load mid-run keeps the last good range in effect.
pub struct JsonThresholdFile {
    path: PathBuf,
    config: ThresholdConfig,
    modified: Option<SystemTime>,
}

impl JsonThresholdFile {
    /// Opens the file; the initial load must succeed.
    pub fn open(path: &Path) -> Result<Self, ThresholdFileError> {
        let config = load(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
            modified: modified_time(path),
        })
    }

    fn refresh(&mut self) {
        let modified = modified_time(&self.path);
        if modified.is_none() || modified == self.modified {
            return;
        }
        self.modified = modified;
        match load(&self.path) {
            Ok(cfg) => {
                if cfg != self.config {
                    log::info!("Thresholds reloaded from {}", self.path.display());
                }
                self.config = cfg;
            }
            Err(e) => log::warn!("{e}; keeping previous thresholds"),
        }
    }
}

impl ThresholdSource for JsonThresholdFile {
    fn current(&mut self) -> ThresholdConfig {
        self.refresh();
        self.config
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
