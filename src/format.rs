//! Turns a captured outcome into the text shown in the output view

use crate::process::{CommandOutcome, OutcomeStatus};
use crate::task::TaskKind;

/// Render an outcome for display
///
/// Captured output is appended after a one-line prefix without truncation.
/// Bytes that are not valid UTF-8 are shown as U+FFFD, since the output view
/// holds text.
pub fn format_outcome(outcome: &CommandOutcome, kind: TaskKind) -> String {
    let output = String::from_utf8_lossy(&outcome.output);

    match (&outcome.status, outcome.has_output()) {
        (OutcomeStatus::Failed(error), false) => format!("{} failed: {}\n", kind.label(), error),
        (OutcomeStatus::Failed(_), true) => format!("{} failed:\n{}", kind.title(), output),
        (OutcomeStatus::Succeeded, false) => match kind {
            TaskKind::Build => format!("{} successful\n", kind.title()),
            TaskKind::Run => "Program finished (no output)\n".to_string(),
        },
        (OutcomeStatus::Succeeded, true) => format!("{} output:\n{}", kind.title(), output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_without_output_uses_lowercase_label_and_error() {
        let outcome = CommandOutcome::failed(Vec::new(), "exit status: 2");
        assert_eq!(
            format_outcome(&outcome, TaskKind::Build),
            "build failed: exit status: 2\n"
        );
    }

    #[test]
    fn test_failure_with_output_shows_output_verbatim() {
        let outcome = CommandOutcome::failed("panic: x\n", "exit status: 2");
        assert_eq!(
            format_outcome(&outcome, TaskKind::Run),
            "Run failed:\npanic: x\n"
        );
    }

    #[test]
    fn test_success_without_output() {
        let outcome = CommandOutcome::succeeded(Vec::new());
        assert_eq!(format_outcome(&outcome, TaskKind::Build), "Build successful\n");
        assert_eq!(
            format_outcome(&outcome, TaskKind::Run),
            "Program finished (no output)\n"
        );
    }

    #[test]
    fn test_success_with_output_is_not_reformatted() {
        let outcome = CommandOutcome::succeeded("hello\n\n  world");
        assert_eq!(
            format_outcome(&outcome, TaskKind::Run),
            "Run output:\nhello\n\n  world"
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_dropped() {
        let outcome = CommandOutcome::failed(b"bad \xff byte\n".to_vec(), "exit status: 1");
        assert_eq!(
            format_outcome(&outcome, TaskKind::Build),
            "Build failed:\nbad \u{FFFD} byte\n"
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let outcome = CommandOutcome::failed("main.go:3: undefined: x\n", "exit status: 1");
        let first = format_outcome(&outcome, TaskKind::Build);
        let second = format_outcome(&outcome.clone(), TaskKind::Build);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}
