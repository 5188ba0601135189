//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Condvar, Mutex};
use std::time::Duration;

use ite::config::BuildConfig;
use ite::editor::EditorState;
use ite::output::{OutputPanel, OutputSink};
use ite::poller::{Timer, TimerCallback};
use ite::process::{CommandOutcome, CommandRequest, Invoker};
use ite::runner::BuildContext;

/// In-memory editor state
#[derive(Debug, Default)]
pub struct FakeEditor {
    pub dir: Option<PathBuf>,
    pub modified: bool,
    pub persist_error: Option<String>,
    pub persist_calls: usize,
}

impl FakeEditor {
    pub fn with_file(dir: &str) -> Self {
        Self {
            dir: Some(PathBuf::from(dir)),
            ..Self::default()
        }
    }

    pub fn without_file() -> Self {
        Self::default()
    }
}

impl EditorState for FakeEditor {
    fn is_modified(&self) -> bool {
        self.modified
    }

    fn persist(&mut self) -> Result<(), String> {
        self.persist_calls += 1;
        match &self.persist_error {
            Some(e) => Err(e.clone()),
            None => {
                self.modified = false;
                Ok(())
            }
        }
    }

    fn file_dir(&self) -> Option<PathBuf> {
        self.dir.clone()
    }
}

/// Invoker returning a fixed outcome and recording every request
pub struct ScriptedInvoker {
    outcome: CommandOutcome,
    pub requests: Mutex<Vec<CommandRequest>>,
}

impl ScriptedInvoker {
    pub fn new(outcome: CommandOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Invoker for ScriptedInvoker {
    fn invoke(&self, request: &CommandRequest) -> CommandOutcome {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

/// Invoker whose calls block until the test releases them
///
/// Each call gets a sequence number (starting at 1) and returns it as output,
/// so tests can tell which request produced which result.
pub struct GatedInvoker {
    started: AtomicUsize,
    started_tx: Mutex<mpsc::Sender<usize>>,
    gate: Arc<(Mutex<HashSet<usize>>, Condvar)>,
}

/// Test-side handle controlling a [`GatedInvoker`]
pub struct Gate {
    started: mpsc::Receiver<usize>,
    gate: Arc<(Mutex<HashSet<usize>>, Condvar)>,
}

impl Gate {
    /// Let invocation number `seq` finish
    pub fn release(&self, seq: usize) {
        let (released, cvar) = &*self.gate;
        released.lock().unwrap().insert(seq);
        cvar.notify_all();
    }

    /// Wait until an invocation has started, returning its sequence number
    pub fn wait_started(&self) -> usize {
        self.started.recv_timeout(Duration::from_secs(5)).unwrap()
    }
}

impl GatedInvoker {
    pub fn new() -> (Arc<Self>, Gate) {
        let (started_tx, started) = mpsc::channel();
        let gate = Arc::new((Mutex::new(HashSet::new()), Condvar::new()));
        let invoker = Arc::new(Self {
            started: AtomicUsize::new(0),
            started_tx: Mutex::new(started_tx),
            gate: Arc::clone(&gate),
        });
        (invoker, Gate { started, gate })
    }
}

impl Invoker for GatedInvoker {
    fn invoke(&self, _request: &CommandRequest) -> CommandOutcome {
        let seq = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.started_tx.lock().unwrap().send(seq);

        let (released, cvar) = &*self.gate;
        let mut released = released.lock().unwrap();
        while !released.contains(&seq) {
            released = cvar.wait(released).unwrap();
        }
        CommandOutcome::succeeded(format!("request {}\n", seq))
    }
}

/// Timer that records requested delays instead of running anything
#[derive(Default)]
pub struct ManualTimer {
    pub scheduled: Vec<(Duration, TimerCallback)>,
}

impl ManualTimer {
    /// Run the oldest scheduled callback, returning its delay
    pub fn fire_next(&mut self) -> Option<Duration> {
        if self.scheduled.is_empty() {
            return None;
        }
        let (delay, callback) = self.scheduled.remove(0);
        let timer: &mut dyn Timer = self;
        callback(timer);
        Some(delay)
    }
}

impl Timer for ManualTimer {
    fn after(&mut self, delay: Duration, callback: TimerCallback) {
        self.scheduled.push((delay, callback));
    }
}

/// Context plus concrete handles to the fakes behind it
pub struct Harness {
    pub context: BuildContext,
    pub editor: Rc<RefCell<FakeEditor>>,
    pub panel: Rc<RefCell<OutputPanel>>,
}

pub fn harness(editor: FakeEditor, invoker: Arc<dyn Invoker>) -> Harness {
    let editor = Rc::new(RefCell::new(editor));
    let panel = Rc::new(RefCell::new(OutputPanel::new()));

    let editor_dyn: Rc<RefCell<dyn EditorState>> = editor.clone();
    let output_dyn: Rc<RefCell<dyn OutputSink>> = panel.clone();
    let context =
        BuildContext::new(editor_dyn, output_dyn, BuildConfig::default()).with_invoker(invoker);

    Harness {
        context,
        editor,
        panel,
    }
}
