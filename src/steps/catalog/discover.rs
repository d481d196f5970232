use crate::error::Result;
use crate::steps::context::RunContext;
use crate::steps::step::{Accumulation, ActionOutput, Availability, Step};
use crate::tools::discover_compiler;

/// Picks the first installed compiler from `build.compilers`.
///
/// Finding none is not a failure: every compiler-dependent step then
/// reports itself unavailable.
pub struct CompilerDiscovery;

impl Step for CompilerDiscovery {
    fn name(&self) -> &str {
        "discover-compiler"
    }

    fn description(&self) -> &str {
        "Discover C++ compiler"
    }

    fn availability(&self, _ctx: &RunContext) -> Availability {
        Availability::Available
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        ctx.compiler = discover_compiler(ctx.probe(), &ctx.config().build.compilers);

        let report = match &ctx.compiler {
            Some(compiler) => format!(
                "Using {} at {}",
                compiler.describe(),
                compiler.tool.path.display()
            ),
            None => format!(
                "No C++ compiler found (tried {}); build-dependent steps will be skipped",
                ctx.config().build.compilers.join(", ")
            ),
        };
        Ok(ActionOutput::report(report))
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::Never
    }
}
