use std::ffi::OsString;

use crate::error::Result;
use crate::shell::{describe, execute};
use crate::steps::context::RunContext;
use crate::steps::step::{ActionOutput, Availability, Step};

/// Runs the configured static lint tool over every source.
pub struct Lint;

impl Step for Lint {
    fn name(&self) -> &str {
        "lint"
    }

    fn description(&self) -> &str {
        "Lint sources"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        let tool = &ctx.config().lint.tool;
        if ctx.probe().locate(tool).is_none() {
            return Availability::Unavailable(format!("{} not found on PATH", tool));
        }
        if ctx.sources().is_empty() {
            return Availability::NotApplicable("no source files".to_string());
        }
        Availability::Available
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let lint = &ctx.config().lint;
        let Some(tool) = ctx.probe().locate(&lint.tool) else {
            return Ok(ActionOutput::report(format!("{} disappeared from PATH", lint.tool)));
        };

        let mut args: Vec<OsString> = lint.args.iter().map(OsString::from).collect();
        args.extend(ctx.sources().iter().map(|s| s.as_os_str().to_os_string()));

        let result = execute(&tool.path, &args, &ctx.command_options())?;
        Ok(ActionOutput::from_command(describe(&tool.path, &args), &result))
    }
}
