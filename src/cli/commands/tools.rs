//! Tools command implementation.
//!
//! `cxxvet tools` shows which external programs would be used and which
//! steps each one feeds, without running any checks.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::ToolsArgs;
use crate::config::{load_config, VetConfig};
use crate::error::Result;
use crate::tools::{discover_compiler, discover_leak_checker, PathProbe, ToolProbe};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// One external tool role and what was found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub role: &'static str,
    /// Candidates tried, in order.
    pub candidates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Extra facts (compiler family, leak marker).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub steps: Vec<&'static str>,
}

/// Probe every tool role for a configuration.
pub fn survey(config: &VetConfig, probe: &dyn ToolProbe) -> Vec<ToolStatus> {
    let compiler = discover_compiler(probe, &config.build.compilers);
    let lint = probe.locate(&config.lint.tool);
    let format = probe.locate(&config.format.tool);
    let leak = discover_leak_checker(
        probe,
        &config.leak_check.tools,
        config.leak_check.marker.as_deref(),
    );

    vec![
        ToolStatus {
            role: "compiler",
            candidates: config.build.compilers.clone(),
            found: compiler.as_ref().map(|c| c.tool.name.clone()),
            path: compiler.as_ref().map(|c| c.tool.path.clone()),
            detail: compiler.as_ref().map(|c| {
                let analysis = if c.family.supports_static_analysis() {
                    "static analysis"
                } else {
                    "no static analysis"
                };
                format!("{} {}, {}", c.family, c.version.as_deref().unwrap_or("?"), analysis)
            }),
            steps: vec![
                "build",
                "run",
                "sanitizer-build",
                "sanitizer-run",
                "static-analysis",
            ],
        },
        ToolStatus {
            role: "lint",
            candidates: vec![config.lint.tool.clone()],
            found: lint.as_ref().map(|t| t.name.clone()),
            path: lint.map(|t| t.path),
            detail: None,
            steps: vec!["lint"],
        },
        ToolStatus {
            role: "formatter",
            candidates: vec![config.format.tool.clone()],
            found: format.as_ref().map(|t| t.name.clone()),
            path: format.map(|t| t.path),
            detail: Some(format!("style {}", config.format.style)),
            steps: vec!["format-check"],
        },
        ToolStatus {
            role: "leak checker",
            candidates: config.leak_check.tools.clone(),
            found: leak.as_ref().map(|l| l.tool.name.clone()),
            path: leak.as_ref().map(|l| l.tool.path.clone()),
            detail: leak.as_ref().map(|l| format!("marker {:?}", l.marker)),
            steps: vec!["leak-check"],
        },
    ]
}

/// The tools command implementation.
pub struct ToolsCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ToolsArgs,
}

impl ToolsCommand {
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ToolsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ToolsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let statuses = survey(&config, &PathProbe::from_env());

        if self.args.json {
            let json = serde_json::to_string_pretty(&statuses).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["Role", "Tool", "Detail", "Steps"]);
        for status in &statuses {
            let tool = match (&status.found, &status.path) {
                (Some(_), Some(path)) => path.display().to_string(),
                _ => format!("missing (tried {})", status.candidates.join(", ")),
            };
            table.add_row([
                status.role.to_string(),
                tool,
                status.detail.clone().unwrap_or_default(),
                status.steps.join(", "),
            ]);
        }
        ui.message(&table.render());

        let missing = statuses.iter().filter(|s| s.found.is_none()).count();
        if missing > 0 {
            ui.warning(&format!("{} tool role(s) missing; their steps will be skipped", missing));
        }
        Ok(CommandResult::success())
    }
}
