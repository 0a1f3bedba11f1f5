//! Run configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::Display;

/// How to handle a move whose destination basename already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CollisionPolicy {
    /// Leave the source in place and record a per-file failure.
    #[default]
    Fail,
    /// Replace the existing destination file.
    Overwrite,
    /// Pick the first free "name (n).ext" in the target.
    AutoRename,
}

/// How files are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeleteMode {
    /// Unlink the file.
    #[default]
    Permanent,
    /// Send the file to the platform trash.
    Trash,
}

/// Configuration for a cleaning run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CleanConfig {
    /// Directory tree to scan.
    pub source: PathBuf,

    /// Directory that receives moved files.
    pub target: PathBuf,

    /// Offer to delete spam-named files after the main pass.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub delete_spam: bool,

    /// Behavior when a moved file's name is already taken in the target.
    #[builder(default)]
    #[serde(default)]
    pub collision: CollisionPolicy,

    /// Permanent deletion or trash.
    #[builder(default)]
    #[serde(default)]
    pub delete_mode: DeleteMode,
}

fn default_true() -> bool {
    true
}

impl CleanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.source {
            Some(ref source) if source.as_os_str().is_empty() => {
                return Err("Source path cannot be empty".to_string());
            }
            None => return Err("Source path is required".to_string()),
            _ => {}
        }
        match self.target {
            Some(ref target) if target.as_os_str().is_empty() => {
                Err("Target path cannot be empty".to_string())
            }
            None => Err("Target path is required".to_string()),
            _ => Ok(()),
        }
    }
}

impl CleanConfig {
    /// Create a new config builder.
    pub fn builder() -> CleanConfigBuilder {
        CleanConfigBuilder::default()
    }

    /// Create a config with default options.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            delete_spam: true,
            collision: CollisionPolicy::default(),
            delete_mode: DeleteMode::default(),
        }
    }
}
