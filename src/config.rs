//! Linker configuration, loadable from TOML.
//!
//! ```toml
//! parallel = true
//! threads = 8
//! min_parallel_records = 64
//! edge_labels = "last-write-wins"
//! ```
//!
//! Every key is optional. Matching thresholds are not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::graph::EdgeLabelPolicy;

fn default_parallel() -> bool {
    true
}
fn default_min_parallel_records() -> usize {
    64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Spread pair evaluation across rayon workers.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Dedicated worker count. `None` uses the global rayon pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Below this many records the run stays on the calling thread.
    #[serde(default = "default_min_parallel_records")]
    pub min_parallel_records: usize,
    /// How repeated connections between one pair label their edge.
    #[serde(default)]
    pub edge_labels: EdgeLabelPolicy,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            threads: None,
            min_parallel_records: default_min_parallel_records(),
            edge_labels: EdgeLabelPolicy::default(),
        }
    }
}

impl LinkerConfig {
    /// Config that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
