//! ite - editor core for building and running the open file
//!
//! A build or run executes on a background thread; its formatted result is
//! handed to the UI thread through a single-slot mailbox that a recurring
//! poller drains.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod format;
pub mod mailbox;
pub mod output;
pub mod poller;
pub mod process;
pub mod runner;
pub mod runtime;
pub mod task;
pub mod tracing;

// Re-export commonly used types
pub use config::BuildConfig;
pub use mailbox::Mailbox;
pub use poller::Poller;
pub use runner::{BuildContext, TaskMessage};
pub use task::TaskKind;
