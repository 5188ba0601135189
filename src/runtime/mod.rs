//! Runtime module - drives the UI thread without a window
//!
//! - `ui_loop` - single-threaded timer queue the poller reschedules itself on
//! - `app` - wires document, output panel, runner, and poller for one action

pub mod app;
pub mod ui_loop;

pub use app::App;
pub use ui_loop::UiLoop;
