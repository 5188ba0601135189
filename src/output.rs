//! Output view and error dialogs
//!
//! The runner and the poller write through [`OutputSink`]; the sink holds no
//! logic of its own.

use std::io::Write;

/// Where build/run status and results are displayed
pub trait OutputSink {
    /// Replace the displayed output with `text`
    fn replace_output(&mut self, text: &str);

    /// Show a blocking error dialog
    fn show_error(&mut self, message: &str);
}

/// Output panel state: the text currently displayed and the dialogs shown
///
/// With `echo` enabled, every replacement is also written to stdout and every
/// dialog to stderr, which is how the headless front-end displays them.
#[derive(Debug, Default)]
pub struct OutputPanel {
    text: String,
    dialogs: Vec<String>,
    renders: usize,
    echo: bool,
}

impl OutputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panel that mirrors everything to the terminal
    pub fn console() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Text currently displayed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every error dialog shown so far, oldest first
    pub fn dialogs(&self) -> &[String] {
        &self.dialogs
    }

    /// Number of times the output has been replaced
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl OutputSink for OutputPanel {
    fn replace_output(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.renders += 1;

        if self.echo {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
                tracing::warn!("Failed to write output: {}", e);
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        tracing::warn!("Error dialog: {}", message);
        self.dialogs.push(message.to_string());

        if self.echo {
            eprintln!("Error: {}", message);
        }
    }
}
