use crate::error::Result;
use crate::shell::{describe, execute};
use crate::steps::context::RunContext;
use crate::steps::step::{Accumulation, ActionOutput, Availability, Step};

use super::build::{compile, compiler_and_sources};

const NO_ARGS: &[&str] = &[];

/// Rebuilds the sources with sanitizer instrumentation.
///
/// Informational: toolchains without sanitizer runtimes fail this step on
/// otherwise healthy projects.
pub struct SanitizerBuild;

impl Step for SanitizerBuild {
    fn name(&self) -> &str {
        "sanitizer-build"
    }

    fn description(&self) -> &str {
        "Build with sanitizers"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        compiler_and_sources(ctx)
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let sanitizer = ctx.config().sanitizer.clone();
        let (action, built) = compile(ctx, &sanitizer.flags, &sanitizer.output)?;
        ctx.sanitized_executable = built;
        Ok(action)
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::Informational
    }
}

/// Runs the instrumented executable; sanitizer reports go to stderr.
pub struct SanitizerRun;

impl Step for SanitizerRun {
    fn name(&self) -> &str {
        "sanitizer-run"
    }

    fn description(&self) -> &str {
        "Run sanitized executable"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        match ctx.sanitized_executable {
            Some(_) => Availability::Available,
            None => Availability::NotApplicable("no sanitized executable was built".to_string()),
        }
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let Some(exe) = ctx.sanitized_executable.clone() else {
            return Ok(ActionOutput::report("no sanitized executable was built"));
        };
        let result = execute(&exe, NO_ARGS, &ctx.command_options())?;
        Ok(ActionOutput::from_command(describe(&exe, NO_ARGS), &result))
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::Informational
    }
}
