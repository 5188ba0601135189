//! UI-thread poller that drains the mailbox
//!
//! The poller is the only consumer of the mailbox and the only place where
//! background results touch the output view. Each firing takes at most one
//! message, renders it, and schedules the next firing after a fixed
//! interval, forever.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::mailbox::Mailbox;
use crate::output::OutputSink;
use crate::runner::{BuildContext, TaskMessage};
use crate::task::TaskKind;

/// Callback run once by a [`Timer`], on the UI thread
pub type TimerCallback = Box<dyn FnOnce(&mut dyn Timer)>;

/// "Run this callback once after `delay`" on the UI thread
pub trait Timer {
    fn after(&mut self, delay: Duration, callback: TimerCallback);
}

/// Recurring mailbox drain
pub struct Poller {
    mailbox: Mailbox<TaskMessage>,
    output: Rc<RefCell<dyn OutputSink>>,
    interval: Duration,
    delivered: Cell<usize>,
    last: Cell<Option<(TaskKind, bool)>>,
}

impl Poller {
    pub fn new(
        mailbox: Mailbox<TaskMessage>,
        output: Rc<RefCell<dyn OutputSink>>,
        interval: Duration,
    ) -> Self {
        Self {
            mailbox,
            output,
            interval,
            delivered: Cell::new(0),
            last: Cell::new(None),
        }
    }

    /// Poller draining `context`'s mailbox into its output view
    pub fn for_context(context: &BuildContext) -> Self {
        Self::new(
            context.mailbox().clone(),
            context.output(),
            context.config().poll_interval(),
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of messages rendered so far
    pub fn delivered(&self) -> usize {
        self.delivered.get()
    }

    /// Kind and success of the most recently rendered message
    pub fn last_delivered(&self) -> Option<(TaskKind, bool)> {
        self.last.get()
    }

    /// Schedule the first firing
    pub fn start(self: &Rc<Self>, timer: &mut dyn Timer) {
        Rc::clone(self).schedule(timer);
    }

    /// Drain and render at most one message; returns whether one was rendered
    pub fn poll_once(&self) -> bool {
        let Some(message) = self.mailbox.try_take() else {
            return false;
        };

        tracing::debug!("Rendering {} result ({} bytes)", message.kind, message.text.len());
        self.output.borrow_mut().replace_output(&message.text);
        self.delivered.set(self.delivered.get() + 1);
        self.last.set(Some((message.kind, message.succeeded)));
        true
    }

    /// One firing: drain, then reschedule regardless of the result
    pub fn fire(self: Rc<Self>, timer: &mut dyn Timer) -> bool {
        let rendered = self.poll_once();
        self.schedule(timer);
        rendered
    }

    fn schedule(self: Rc<Self>, timer: &mut dyn Timer) {
        let interval = self.interval;
        timer.after(
            interval,
            Box::new(move |timer| {
                self.fire(timer);
            }),
        );
    }
}
