//! Run command implementation.
//!
//! `cxxvet run` (or plain `cxxvet`) runs the whole step sequence in the
//! project directory and exits with the folded code.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::runner::{RunProgress, RunReport, StepRecord, StepRunner, StepStatus};
use crate::sources::discover_sources;
use crate::steps::{catalog, RunContext};
use crate::ui::{format_duration, SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Load config and sources, then run every step.
    pub fn run_report(&self, ui: &mut dyn UserInterface) -> Result<RunReport> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let sources = discover_sources(&self.project_root, &config.sources.extensions)?;
        let strict = self.args.strict || config.strict;

        ui.show_header(&format!(
            "cxxvet · {} · {} source file(s){}",
            self.project_root.display(),
            sources.len(),
            if strict { " · strict" } else { "" }
        ));

        let steps = catalog::default_steps(&config);
        let mut ctx = RunContext::new(&self.project_root, config, sources)
            .keep_artifacts(self.args.keep_artifacts);

        let mut spinner: Option<Box<dyn SpinnerHandle>> = None;
        let report = StepRunner::new()
            .strict(strict)
            .run_with_progress(&steps, &mut ctx, |progress| match progress {
                RunProgress::StepStarting {
                    name,
                    description,
                    index,
                    total,
                } => {
                    ui.show_banner(name);
                    ui.show_progress(index + 1, total);
                    spinner = Some(ui.start_spinner(description));
                }
                RunProgress::StepSkipped { record } | RunProgress::StepFinished { record } => {
                    if let Some(mut handle) = spinner.take() {
                        show_record(ui, handle.as_mut(), record);
                    }
                }
            });

        ui.show_summary(&report);
        Ok(report)
    }
}

/// Print what a step produced, then its status line.
fn show_record(ui: &mut dyn UserInterface, spinner: &mut dyn SpinnerHandle, record: &StepRecord) {
    let mode = ui.output_mode();
    if mode.shows_commands() {
        if let Some(command) = &record.command {
            spinner.println(&format!("$ {}", command));
        }
    }
    if mode.shows_step_output() {
        if let Some(output) = &record.output {
            spinner.println(output);
        }
    }

    let took = format_duration(std::time::Duration::from_millis(record.duration_ms));
    match record.status {
        StepStatus::Passed => {
            spinner.finish_success(&format!("{} ({})", record.description, took));
        }
        StepStatus::Failed => {
            let detail = record
                .note
                .clone()
                .unwrap_or_else(|| record.outcome.to_string());
            spinner.finish_error(&format!("{}: {}", record.description, detail));
        }
        StepStatus::Warned => {
            spinner.finish_warning(&format!(
                "{}: {} (not counted)",
                record.description, record.outcome
            ));
        }
        StepStatus::Skipped => {
            spinner.finish_skipped(&format!(
                "{} skipped: {}",
                record.description,
                record.note.as_deref().unwrap_or("unavailable")
            ));
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.run_report(ui)?;
        if self.args.json {
            println!("{}", report.to_json().map_err(anyhow::Error::from)?);
        }
        Ok(CommandResult::from_code(report.exit_code))
    }
}
