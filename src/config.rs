//! Build configuration persistence
//!
//! Stores toolchain preferences in `~/.config/ite-editor/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::task::TaskKind;

/// Which program builds and runs the open file, and how often results are polled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Program invoked for both build and run (e.g., "go")
    #[serde(default = "default_toolchain")]
    pub toolchain: String,

    /// Arguments passed to the toolchain for a build
    #[serde(default = "default_build_args")]
    pub build_args: Vec<String>,

    /// Arguments passed to the toolchain for a run
    #[serde(default = "default_run_args")]
    pub run_args: Vec<String>,

    /// Delay between two poller firings on the UI thread
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_toolchain() -> String {
    "go".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["build".to_string(), "./...".to_string()]
}

fn default_run_args() -> Vec<String> {
    vec!["run".to_string(), ".".to_string()]
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            toolchain: default_toolchain(),
            build_args: default_build_args(),
            run_args: default_run_args(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl BuildConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Full argument vector (program first) for the given task
    pub fn command_for(&self, kind: TaskKind) -> Vec<String> {
        let args = match kind {
            TaskKind::Build => &self.build_args,
            TaskKind::Run => &self.run_args,
        };
        std::iter::once(self.toolchain.clone())
            .chain(args.iter().cloned())
            .collect()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
