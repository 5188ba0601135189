//! The two user actions that start background work

use std::fmt;

/// Placeholder shown while a build is in flight
pub const STATUS_BUILDING: &str = "Building...\n";
/// Placeholder shown while a run is in flight
pub const STATUS_RUNNING: &str = "Running...\n";
/// Dialog text when build/run is requested without a file on disk
pub const STATUS_NO_FILE: &str = "No file open. Please save first.";

/// A user-triggered action that launches the toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Build,
    Run,
}

impl TaskKind {
    /// Lowercase label ("build" / "run")
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Build => "build",
            TaskKind::Run => "run",
        }
    }

    /// Capitalized label ("Build" / "Run")
    pub fn title(self) -> &'static str {
        match self {
            TaskKind::Build => "Build",
            TaskKind::Run => "Run",
        }
    }

    /// Status rendered immediately when the task starts
    pub fn placeholder(self) -> &'static str {
        match self {
            TaskKind::Build => STATUS_BUILDING,
            TaskKind::Run => STATUS_RUNNING,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
