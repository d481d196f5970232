//! cxxvet CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use cxxvet::cli::{Cli, CommandDispatcher};
use cxxvet::ui::{create_ui, should_use_colors};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code for errors that stop the run before any step (bad config,
/// unreadable project directory).
const USAGE_ERROR_CODE: u8 = 2;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cxxvet=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cxxvet=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("cxxvet starting with args: {:?}", cli);

    let project_root = match &cli.project {
        Some(path) => path.clone(),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: cannot determine current directory: {}", e);
                return ExitCode::from(USAGE_ERROR_CODE);
            }
        },
    };

    let colors = should_use_colors(cli.no_color);
    let mut ui = create_ui(true, cli.output_mode(), colors);

    let dispatcher = CommandDispatcher::new(project_root, cli.config.clone());
    match dispatcher.dispatch(&cli, ui.as_mut()) {
        // Codes outside 0..=255 cannot come from a real process status.
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(USAGE_ERROR_CODE)
        }
    }
}
