//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::ui::OutputMode;

/// cxxvet - run the standard C++ checks over a directory of sources.
#[derive(Debug, Parser)]
#[command(name = "cxxvet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .cxxvet.yml)
    #[arg(short, long, global = true, env = "CXXVET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the sources (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show the command line of every step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output mode implied by the global flags and the subcommand.
    ///
    /// JSON output owns stdout, so it silences everything else.
    pub fn output_mode(&self) -> OutputMode {
        match &self.command {
            Some(Commands::Run(args)) if args.json => OutputMode::Silent,
            Some(Commands::Tools(args)) if args.json => OutputMode::Silent,
            _ => OutputMode::from_flags(self.verbose, self.quiet),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every check (default if no command specified)
    Run(RunArgs),

    /// Show which tools were found and the steps they feed
    Tools(ToolsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Let informational steps (format, sanitizer) fail the run
    #[arg(long)]
    pub strict: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Leave built executables and generated files in place
    #[arg(long)]
    pub keep_artifacts: bool,
}

/// Arguments for the `tools` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ToolsArgs {
    /// Print the tool list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_args_means_default_run() {
        let cli = Cli::try_parse_from(["cxxvet"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn run_flags_parse() {
        let cli =
            Cli::try_parse_from(["cxxvet", "run", "--strict", "--keep-artifacts"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.strict);
                assert!(args.keep_artifacts);
                assert!(!args.json);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn json_silences_output() {
        let cli = Cli::try_parse_from(["cxxvet", "run", "--json", "--verbose"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Silent);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cxxvet", "tools", "-p", "/src", "-q"]).unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("/src")));
        assert_eq!(cli.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["cxxvet", "completions"]).is_err());
        let cli = Cli::try_parse_from(["cxxvet", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Zsh }))
        ));
    }
}
