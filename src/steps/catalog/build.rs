use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::error::Result;
use crate::shell::{describe, execute};
use crate::steps::context::RunContext;
use crate::steps::step::{ActionOutput, Availability, Step};

/// Compiles every source into one executable.
pub struct Build;

impl Step for Build {
    fn name(&self) -> &str {
        "build"
    }

    fn description(&self) -> &str {
        "Build executable"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        compiler_and_sources(ctx)
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let output = ctx.config().build.output.clone();
        let (action, built) = compile(ctx, &[], &output)?;
        ctx.executable = built;
        Ok(action)
    }
}

/// Shared precondition for every step that invokes the compiler on sources.
pub(super) fn compiler_and_sources(ctx: &RunContext) -> Availability {
    if ctx.compiler.is_none() {
        return Availability::Unavailable("no C++ compiler found".to_string());
    }
    if ctx.sources().is_empty() {
        return Availability::NotApplicable("no source files".to_string());
    }
    Availability::Available
}

/// Compile all sources to `output` (relative to the project root).
///
/// Returns the action result and, if the compiler succeeded and the file
/// exists, the absolute executable path.
pub(super) fn compile(
    ctx: &mut RunContext,
    extra_flags: &[String],
    output: &str,
) -> Result<(ActionOutput, Option<PathBuf>)> {
    let compiler = ctx
        .compiler
        .clone()
        .ok_or_else(|| anyhow!("compile called without a discovered compiler"))?;

    let target = ctx.resolve(output);
    remove_stale(&target);

    let build = &ctx.config().build;
    let mut args: Vec<OsString> = vec![format!("-std={}", build.std).into()];
    args.extend(build.flags.iter().map(OsString::from));
    args.extend(extra_flags.iter().map(OsString::from));
    args.push("-o".into());
    args.push(output.into());
    args.extend(ctx.sources().iter().map(|s| s.as_os_str().to_os_string()));

    ctx.register_artifact(target.clone());

    let result = execute(&compiler.tool.path, &args, &ctx.command_options())?;
    let action = ActionOutput::from_command(describe(&compiler.tool.path, &args), &result);
    let built = (result.success && target.is_file()).then_some(target);
    Ok((action, built))
}

// An executable left by an earlier run must not pass for this build's output.
fn remove_stale(target: &Path) {
    if target.exists() {
        if let Err(e) = fs::remove_file(target) {
            tracing::warn!("Could not remove stale {}: {}", target.display(), e);
        }
    }
}
