//! Console output.
//!
//! - [`UserInterface`] trait so runs can be rendered or captured in tests
//! - [`TerminalUI`] for a real terminal, with spinners
//! - [`NonInteractiveUI`] for pipes and CI logs
//! - [`MockUI`] for assertions
//!
//! # Example
//!
//! ```
//! use cxxvet::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet, false);
//! ui.show_banner("build");
//! ui.success("Build executable");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, CxxvetTheme};

use crate::runner::RunReport;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header.
    fn show_header(&mut self, title: &str);

    /// Show the separator printed before each step.
    fn show_banner(&mut self, title: &str);

    /// Show progress (e.g., "Step 3 of 10").
    fn show_progress(&mut self, current: usize, total: usize);

    /// Show the per-step table and the final exit code.
    fn show_summary(&mut self, report: &RunReport);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Print text above the spinner (captured tool output).
    fn println(&mut self, text: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark the operation as failed without affecting the exit code.
    fn finish_warning(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// The separator line printed before a step: `==== name ====`.
pub fn banner_line(title: &str) -> String {
    format!("==== {} ====", title)
}

/// One summary line per step, shared by the text UIs.
pub(crate) fn summary_lines(report: &RunReport, theme: &CxxvetTheme) -> Vec<String> {
    use crate::runner::StepStatus;

    let mut lines = Vec::with_capacity(report.steps.len() + 2);
    for step in &report.steps {
        let detail = match step.status {
            StepStatus::Skipped => step.note.clone().unwrap_or_default(),
            _ => match step.outcome.code() {
                0 => format_duration(std::time::Duration::from_millis(step.duration_ms)),
                code => format!("exit {}", code),
            },
        };
        let icon = step.status.display_char().to_string();
        let icon = match step.status {
            StepStatus::Passed => theme.success.apply_to(icon),
            StepStatus::Failed => theme.error.apply_to(icon),
            StepStatus::Warned => theme.warning.apply_to(icon),
            StepStatus::Skipped => theme.dim.apply_to(icon),
        };
        lines.push(format!(
            "  {} {:<18} {}",
            icon,
            step.name,
            theme.dim.apply_to(detail)
        ));
    }

    let verdict = format!(
        "{} passed · {} failed · {} warned · {} skipped · exit {}",
        report.count(StepStatus::Passed),
        report.count(StepStatus::Failed),
        report.count(StepStatus::Warned),
        report.count(StepStatus::Skipped),
        report.exit_code
    );
    lines.push(String::new());
    lines.push(if report.success() {
        theme.format_success(&verdict)
    } else {
        theme.format_error(&verdict)
    });
    lines
}
