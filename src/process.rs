//! External process invocation
//!
//! Launches the toolchain synchronously and captures stdout and stderr as a
//! single interleaved byte stream. Always called from a background thread:
//! the call blocks for the child's entire lifetime.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// A command line plus the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandRequest {
    /// Create a request from an argument vector whose first token is the program
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            working_dir: None,
        }
    }

    /// Run in `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Whether the invocation succeeded, and if not, why
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Succeeded,
    /// Launch failure or non-zero exit, with a description
    Failed(String),
}

/// Captured result of one completed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Combined stdout/stderr bytes, possibly empty
    pub output: Vec<u8>,
    pub status: OutcomeStatus,
}

impl CommandOutcome {
    pub fn succeeded(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            status: OutcomeStatus::Succeeded,
        }
    }

    pub fn failed(output: impl Into<Vec<u8>>, error: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            status: OutcomeStatus::Failed(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }

    pub fn has_output(&self) -> bool {
        !self.output.is_empty()
    }
}

/// Something that can execute a [`CommandRequest`] to completion
///
/// Production code uses [`SystemInvoker`]; tests substitute scripted
/// implementations that never touch the OS.
pub trait Invoker: Send + Sync {
    fn invoke(&self, request: &CommandRequest) -> CommandOutcome;
}

/// Invoker backed by `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl Invoker for SystemInvoker {
    fn invoke(&self, request: &CommandRequest) -> CommandOutcome {
        invoke(request)
    }
}

/// Launch the request, wait for it, and capture its combined output
///
/// Never returns an error: launch failures and non-zero exits both become
/// [`OutcomeStatus::Failed`], with whatever output was captured preserved.
pub fn invoke(request: &CommandRequest) -> CommandOutcome {
    let Some(program) = request.program() else {
        return CommandOutcome::failed(Vec::new(), "empty command line");
    };

    tracing::debug!(
        "Launching {:?} in {}",
        request.args(),
        request
            .working_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );

    let mut output = Vec::new();
    match run_captured(request, &mut output) {
        Ok(status) if status.success() => CommandOutcome::succeeded(output),
        Ok(status) => {
            tracing::debug!("{} exited with {}", program, status);
            CommandOutcome::failed(output, status.to_string())
        }
        Err(e) => {
            tracing::warn!("Failed to run {}: {}", program, e);
            CommandOutcome::failed(output, format!("{}: {}", program, e))
        }
    }
}

fn run_captured(request: &CommandRequest, output: &mut Vec<u8>) -> io::Result<ExitStatus> {
    let (program, args) = request
        .args()
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;

    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    if let Some(dir) = request.working_dir() {
        command.current_dir(dir);
    }

    let (mut reader, writer) = io::pipe()?;
    command.stdout(writer.try_clone()?).stderr(writer);

    let spawned = command.spawn();
    // The command still owns the parent's write ends; they must be closed
    // before reading or EOF never arrives.
    drop(command);
    let mut child = spawned?;

    let read = reader.read_to_end(output);
    let status = child.wait()?;
    read?;
    Ok(status)
}
