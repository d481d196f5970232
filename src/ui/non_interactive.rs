//! Line-oriented UI for pipes and CI logs.

use crate::runner::RunReport;

use super::theme::CxxvetTheme;
use super::{summary_lines, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation without spinners.
///
/// Each step's result is printed as a single line once it is known, so
/// logs stay readable.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: CxxvetTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        Self {
            mode,
            theme: CxxvetTheme::for_colors(colors),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner {
            show: self.mode.shows_spinners(),
            show_output: self.mode.shows_step_output(),
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_banner(&mut self, title: &str) {
        if self.mode.shows_step_output() {
            println!("{}", self.theme.format_banner(title));
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_step_output() {
            println!("{}", self.theme.step_number.apply_to(format!("[{}/{}]", current, total)));
        }
    }

    fn show_summary(&mut self, report: &RunReport) {
        if !self.mode.shows_status() {
            return;
        }
        println!();
        for line in summary_lines(report, &self.theme) {
            println!("{}", line);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prints tool output and the final status line, nothing animated.
struct LineSpinner {
    show: bool,
    show_output: bool,
    theme: CxxvetTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn println(&mut self, text: &str) {
        if self.show_output {
            println!("{}", text.trim_end());
        }
    }

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_error(msg));
        }
    }

    fn finish_warning(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.theme.format_skipped(msg));
        }
    }
}
