use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::config::BuildConfig;
use crate::editor::{Document, EditorState};
use crate::output::{OutputPanel, OutputSink};
use crate::poller::Poller;
use crate::process::Invoker;
use crate::runner::BuildContext;
use crate::task::TaskKind;

use super::ui_loop::UiLoop;

/// How a single build/run ended, as seen from the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// A result was displayed; `succeeded` reflects the process outcome
    Finished { succeeded: bool },
    /// The request was rejected before any process was launched
    Rejected,
    /// The deadline passed before a result was displayed
    TimedOut,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Finished { succeeded: true } => 0,
            _ => 1,
        }
    }
}

/// Headless application: one document, one output panel, one poller
pub struct App {
    document: Rc<RefCell<Document>>,
    panel: Rc<RefCell<OutputPanel>>,
    context: BuildContext,
    poller: Rc<Poller>,
    ui: UiLoop,
    in_flight: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(document: Document, panel: OutputPanel, config: BuildConfig) -> Self {
        Self::build(document, panel, config, None)
    }

    /// Same as [`App::new`] but launching processes through `invoker`
    pub fn with_invoker(
        document: Document,
        panel: OutputPanel,
        config: BuildConfig,
        invoker: Arc<dyn Invoker>,
    ) -> Self {
        Self::build(document, panel, config, Some(invoker))
    }

    fn build(
        document: Document,
        panel: OutputPanel,
        config: BuildConfig,
        invoker: Option<Arc<dyn Invoker>>,
    ) -> Self {
        let document = Rc::new(RefCell::new(document));
        let panel = Rc::new(RefCell::new(panel));

        let editor: Rc<RefCell<dyn EditorState>> = document.clone();
        let output: Rc<RefCell<dyn OutputSink>> = panel.clone();
        let mut context = BuildContext::new(editor, output, config);
        if let Some(invoker) = invoker {
            context = context.with_invoker(invoker);
        }

        let poller = Rc::new(Poller::for_context(&context));
        let mut ui = UiLoop::new();
        poller.start(&mut ui);

        Self {
            document,
            panel,
            context,
            poller,
            ui,
            in_flight: Vec::new(),
        }
    }

    pub fn document(&self) -> Rc<RefCell<Document>> {
        Rc::clone(&self.document)
    }

    pub fn panel(&self) -> Rc<RefCell<OutputPanel>> {
        Rc::clone(&self.panel)
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Handle a user action on the UI thread; returns whether work was started
    pub fn trigger(&mut self, kind: TaskKind) -> bool {
        match self.context.start(kind) {
            Some(handle) => {
                self.in_flight.push(handle);
                true
            }
            None => false,
        }
    }

    /// Whether every started task has finished and its result was drained
    pub fn is_idle(&self) -> bool {
        self.in_flight.iter().all(JoinHandle::is_finished) && self.context.mailbox().is_empty()
    }

    /// Pump the UI loop until all started work has been displayed
    ///
    /// Returns `false` if `timeout` elapsed first. Without a timeout, or with
    /// one too large to represent as a deadline, this waits as long as the
    /// child processes run.
    pub fn run_until_idle(&mut self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let in_flight = &self.in_flight;
        let mailbox = self.context.mailbox().clone();
        let idle = self.ui.run_until(
            || in_flight.iter().all(JoinHandle::is_finished) && mailbox.is_empty(),
            deadline,
        );

        if idle {
            for handle in self.in_flight.drain(..) {
                if handle.join().is_err() {
                    tracing::warn!("Background task panicked");
                }
            }
        }
        idle
    }

    /// Trigger `kind` and wait for its result to be displayed
    pub fn run_action(&mut self, kind: TaskKind, timeout: Option<Duration>) -> RunStatus {
        if !self.trigger(kind) {
            return RunStatus::Rejected;
        }

        if !self.run_until_idle(timeout) {
            tracing::warn!("Timed out waiting for {}", kind);
            return RunStatus::TimedOut;
        }

        match self.poller.last_delivered() {
            Some((_, succeeded)) => RunStatus::Finished { succeeded },
            None => RunStatus::TimedOut,
        }
    }
}
