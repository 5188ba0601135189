//! Task runner: starts a build or run without blocking the UI thread
//!
//! [`BuildContext`] owns the mailbox and the handles to the editor and the
//! output view. `start` runs on the UI thread, shows a placeholder, and hands
//! the toolchain invocation to a fresh background thread whose formatted
//! result lands in the mailbox. Nothing is coordinated between two starts: a
//! later result replaces an earlier unread one, whichever finishes last wins.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::BuildConfig;
use crate::editor::EditorState;
use crate::format::format_outcome;
use crate::mailbox::Mailbox;
use crate::output::OutputSink;
use crate::process::{CommandOutcome, CommandRequest, Invoker, SystemInvoker};
use crate::task::{TaskKind, STATUS_NO_FILE};

/// A formatted result travelling from a background thread to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMessage {
    pub kind: TaskKind,
    /// Text to display, as produced by [`format_outcome`]
    pub text: String,
    pub succeeded: bool,
}

impl TaskMessage {
    pub fn from_outcome(outcome: &CommandOutcome, kind: TaskKind) -> Self {
        Self {
            kind,
            text: format_outcome(outcome, kind),
            succeeded: outcome.is_success(),
        }
    }
}

/// Shared state for build/run requests, owned by the UI thread
pub struct BuildContext {
    mailbox: Mailbox<TaskMessage>,
    editor: Rc<RefCell<dyn EditorState>>,
    output: Rc<RefCell<dyn OutputSink>>,
    invoker: Arc<dyn Invoker>,
    config: BuildConfig,
}

impl BuildContext {
    pub fn new(
        editor: Rc<RefCell<dyn EditorState>>,
        output: Rc<RefCell<dyn OutputSink>>,
        config: BuildConfig,
    ) -> Self {
        Self {
            mailbox: Mailbox::new(),
            editor,
            output,
            invoker: Arc::new(SystemInvoker),
            config,
        }
    }

    /// Replace the process launcher (used by tests and embedders)
    pub fn with_invoker(mut self, invoker: Arc<dyn Invoker>) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn mailbox(&self) -> &Mailbox<TaskMessage> {
        &self.mailbox
    }

    pub fn output(&self) -> Rc<RefCell<dyn OutputSink>> {
        Rc::clone(&self.output)
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build(&self) -> Option<JoinHandle<()>> {
        self.start(TaskKind::Build)
    }

    pub fn run(&self) -> Option<JoinHandle<()>> {
        self.start(TaskKind::Run)
    }

    /// Start `kind` in the background
    ///
    /// Returns `None` if a precondition failed; the failure has already been
    /// shown as an error dialog and no process was launched.
    pub fn start(&self, kind: TaskKind) -> Option<JoinHandle<()>> {
        let dir = self.editor.borrow().file_dir();
        let Some(dir) = dir else {
            tracing::warn!("{} requested with no file open", kind);
            self.output.borrow_mut().show_error(STATUS_NO_FILE);
            return None;
        };

        // Build and run always see the content on disk.
        let saved = {
            let mut editor = self.editor.borrow_mut();
            if editor.is_modified() {
                editor.persist()
            } else {
                Ok(())
            }
        };
        if let Err(e) = saved {
            tracing::warn!("Not starting {}: {}", kind, e);
            self.output.borrow_mut().show_error(&e);
            return None;
        }

        self.output.borrow_mut().replace_output(kind.placeholder());

        let request = CommandRequest::new(self.config.command_for(kind)).in_dir(dir);
        tracing::info!("Starting {}: {:?}", kind, request.args());

        let mailbox = self.mailbox.clone();
        let invoker = Arc::clone(&self.invoker);
        let spawned = thread::Builder::new()
            .name(format!("ite-{}", kind))
            .spawn(move || {
                let outcome = invoker.invoke(&request);
                tracing::info!(
                    "{} finished ({} bytes of output, success: {})",
                    kind,
                    outcome.output.len(),
                    outcome.is_success()
                );
                mailbox.offer(TaskMessage::from_outcome(&outcome, kind));
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("Failed to spawn {} thread: {}", kind, e);
                let outcome = CommandOutcome::failed(Vec::new(), e.to_string());
                self.output
                    .borrow_mut()
                    .replace_output(&format_outcome(&outcome, kind));
                None
            }
        }
    }
}
