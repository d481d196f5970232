use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::{describe, execute};
use crate::steps::context::RunContext;
use crate::steps::oracle::{MarkerOracle, Oracle, Outcome, ANALYSIS_WARNING_CODE};
use crate::steps::step::{ActionOutput, Availability, Step};

/// Runs the compiler's built-in static analyzer.
///
/// Fails with [`ANALYSIS_WARNING_CODE`] when the output mentions the
/// warning marker, regardless of the analyzer's exit status.
pub struct StaticAnalysis {
    oracle: MarkerOracle,
}

impl StaticAnalysis {
    pub fn new(warning_marker: &str) -> Self {
        Self {
            oracle: MarkerOracle::must_not_contain(warning_marker, ANALYSIS_WARNING_CODE),
        }
    }
}

impl Step for StaticAnalysis {
    fn name(&self) -> &str {
        "static-analysis"
    }

    fn description(&self) -> &str {
        "Static analysis"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        let Some(compiler) = &ctx.compiler else {
            return Availability::Unavailable("no C++ compiler found".to_string());
        };
        if !compiler.family.supports_static_analysis() {
            return Availability::NotApplicable(format!(
                "{} has no built-in static analyzer",
                compiler.describe()
            ));
        }
        if ctx.sources().is_empty() {
            return Availability::NotApplicable("no source files".to_string());
        }
        Availability::Available
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let Some(compiler) = ctx.compiler.clone() else {
            return Ok(ActionOutput::report("no C++ compiler found"));
        };
        let Some(analysis_args) = compiler.family.analysis_args() else {
            return Ok(ActionOutput::report("no static analyzer"));
        };

        let mut args: Vec<OsString> = analysis_args.iter().map(OsString::from).collect();
        args.push(format!("-std={}", ctx.config().build.std).into());
        args.extend(ctx.sources().iter().map(|s| s.as_os_str().to_os_string()));

        // The analyzer drops a report next to each source.
        let reports: Vec<PathBuf> = ctx
            .sources()
            .iter()
            .filter_map(|s| report_path(ctx.project_root(), s))
            .collect();
        for report in reports {
            ctx.register_artifact(report);
        }

        tracing::debug!("Static analysis oracle: {}", self.oracle.describe());
        let result = execute(&compiler.tool.path, &args, &ctx.command_options())?;
        Ok(ActionOutput::from_command(
            describe(&compiler.tool.path, &args),
            &result,
        ))
    }

    fn interpret(&self, _ctx: &RunContext, output: &ActionOutput) -> Outcome {
        self.oracle.judge(output)
    }
}

/// Where the analyzer writes its report for `source`: the full stem plus
/// `.plist`, so `foo.test.cpp` maps to `foo.test.plist`.
fn report_path(root: &Path, source: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?;
    Some(root.join(format!("{}.plist", stem.to_string_lossy())))
}
