//! Configuration loading from perflab.toml
//!
//! Workload sizes and the default output format can be set in a
//! `perflab.toml` discovered by walking up from the current directory.
//! Everything has a default, so the file is optional; CLI flags win over
//! file values.

use perflab_core::ExperimentParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Perflab configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PerflabConfig {
    /// Workload sizes and durations
    #[serde(default)]
    pub experiments: ExperimentParams,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl PerflabConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("perflab.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
