use crate::error::Result;
use crate::shell::{describe, execute};
use crate::steps::context::RunContext;
use crate::steps::step::{ActionOutput, Availability, Step};

const NO_ARGS: &[&str] = &[];

/// Runs the executable produced by [`Build`](super::Build).
pub struct RunExecutable;

impl Step for RunExecutable {
    fn name(&self) -> &str {
        "run"
    }

    fn description(&self) -> &str {
        "Run executable"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        match ctx.executable {
            Some(_) => Availability::Available,
            None => Availability::NotApplicable("no executable was built".to_string()),
        }
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let exe = match &ctx.executable {
            Some(exe) => exe.clone(),
            None => return Ok(ActionOutput::report("no executable was built")),
        };
        let result = execute(&exe, NO_ARGS, &ctx.command_options())?;
        Ok(ActionOutput::from_command(describe(&exe, NO_ARGS), &result))
    }
}
