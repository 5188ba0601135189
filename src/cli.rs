//! Command-line argument parsing
//!
//! `ite build main.go` / `ite run main.go`: open the file, start the action,
//! and display the result once the background process finishes.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::BuildConfig;
use crate::task::TaskKind;

/// Build or run the open file without blocking the editor
#[derive(Parser, Debug)]
#[command(name = "ite", version, about = "Build or run the open file")]
pub struct CliArgs {
    /// Action to perform
    #[arg(value_enum)]
    pub action: Action,

    /// File the action applies to; its directory is the working directory
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the toolchain program (e.g., "cargo")
    #[arg(long, value_name = "PROG")]
    pub toolchain: Option<String>,

    /// Override the poller interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Give up waiting for the result after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Build,
    Run,
}

impl From<Action> for TaskKind {
    fn from(action: Action) -> Self {
        match action {
            Action::Build => TaskKind::Build,
            Action::Run => TaskKind::Run,
        }
    }
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub kind: TaskKind,
    pub file: Option<PathBuf>,
    pub build: BuildConfig,
    pub timeout: Option<Duration>,
}

impl CliArgs {
    /// Merge CLI overrides on top of `base`
    pub fn into_config(self, base: BuildConfig) -> StartupConfig {
        let mut build = base;
        if let Some(toolchain) = self.toolchain {
            build.toolchain = toolchain;
        }
        if let Some(ms) = self.poll_interval_ms {
            build.poll_interval_ms = ms;
        }

        StartupConfig {
            kind: self.action.into(),
            file: self.file,
            build,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    /// Load the config file named by `--config`, or the default one
    pub fn load_base_config(&self) -> BuildConfig {
        match &self.config {
            Some(path) => BuildConfig::load_from(path),
            None => BuildConfig::load(),
        }
    }
}
