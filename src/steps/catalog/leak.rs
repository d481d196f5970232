use crate::error::Result;
use crate::shell::{describe, execute};
use crate::steps::context::RunContext;
use crate::steps::oracle::{MarkerOracle, Oracle, Outcome, LEAK_SENTINEL};
use crate::steps::step::{ActionOutput, Availability, Step};
use crate::tools::{discover_leak_checker, LeakChecker};

/// Runs the built executable under a leak checker.
///
/// The checker's exit status is ignored; the step passes only when the
/// checker's "no leaks" sentence appears in its output. The checker is
/// resolved from each run's context, so one step value can serve many runs.
#[derive(Default)]
pub struct LeakCheck {
    oracle: Option<Box<dyn Oracle>>,
}

impl LeakCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judge output with `oracle` instead of the checker's own marker.
    pub fn with_oracle(oracle: Box<dyn Oracle>) -> Self {
        Self {
            oracle: Some(oracle),
        }
    }
}

fn resolve_checker(ctx: &RunContext) -> Option<LeakChecker> {
    let config = &ctx.config().leak_check;
    discover_leak_checker(ctx.probe(), &config.tools, config.marker.as_deref())
}

impl Step for LeakCheck {
    fn name(&self) -> &str {
        "leak-check"
    }

    fn description(&self) -> &str {
        "Check for memory leaks"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        let tools = &ctx.config().leak_check.tools;
        if ctx.probe().locate_first(tools).is_none() {
            return Availability::Unavailable(format!(
                "no leak checker found (tried {})",
                tools.join(", ")
            ));
        }
        if ctx.executable.is_none() {
            return Availability::NotApplicable("no executable was built".to_string());
        }
        Availability::Available
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        ctx.leak_checker = resolve_checker(ctx);
        let (Some(checker), Some(exe)) = (&ctx.leak_checker, &ctx.executable) else {
            return Ok(ActionOutput::report("nothing to check"));
        };
        tracing::debug!("Leak check will match {:?}", checker.marker);

        let args = checker.args_for(exe);
        let result = execute(&checker.tool.path, &args, &ctx.command_options())?;
        Ok(ActionOutput::from_command(
            describe(&checker.tool.path, &args),
            &result,
        ))
    }

    fn interpret(&self, ctx: &RunContext, output: &ActionOutput) -> Outcome {
        if let Some(oracle) = &self.oracle {
            return oracle.judge(output);
        }
        match &ctx.leak_checker {
            Some(checker) => {
                MarkerOracle::must_contain(&checker.marker, LEAK_SENTINEL).judge(output)
            }
            // No marker was ever selected, so the clean sentence cannot be present.
            None => Outcome::PatternMatchFailure(LEAK_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VetConfig;
    use crate::tools::leak::VALGRIND_CLEAN_MARKER;
    use crate::tools::{PathProbe, Tool};
    use std::path::{Path, PathBuf};

    fn context() -> RunContext {
        RunContext::with_probe(
            Path::new("/project"),
            VetConfig::default(),
            vec![PathBuf::from("main.cpp")],
            Box::new(PathProbe::new(Vec::new())),
        )
    }

    #[test]
    fn unavailable_without_checker() {
        let step = LeakCheck::new();
        let availability = step.availability(&context());
        assert!(matches!(availability, Availability::Unavailable(_)));
        assert!(availability.reason().unwrap().contains("valgrind"));
    }

    #[test]
    fn custom_oracle_judges_output() {
        let step = LeakCheck::with_oracle(Box::new(MarkerOracle::must_contain(
            "clean", LEAK_SENTINEL,
        )));
        let ctx = context();
        let clean = ActionOutput::new(1, Some("process exited clean".to_string()));
        let dirty = ActionOutput::new(0, Some("40 bytes lost".to_string()));
        assert_eq!(step.interpret(&ctx, &clean), Outcome::Success);
        assert_eq!(step.interpret(&ctx, &dirty), Outcome::PatternMatchFailure(111));
    }

    #[test]
    fn marker_comes_from_the_context_checker() {
        let step = LeakCheck::new();
        let mut ctx = context();
        ctx.leak_checker = Some(LeakChecker::from_version_text(
            Tool {
                name: "valgrind".to_string(),
                path: PathBuf::from("/usr/bin/valgrind"),
            },
            "valgrind-3.22.0",
            None,
        ));
        let clean = ActionOutput::new(0, Some(format!("==1== {}", VALGRIND_CLEAN_MARKER)));
        let leaky = ActionOutput::new(0, Some("==1== definitely lost: 8 bytes".to_string()));
        assert_eq!(step.interpret(&ctx, &clean), Outcome::Success);
        assert_eq!(step.interpret(&ctx, &leaky), Outcome::PatternMatchFailure(111));
    }

    #[test]
    fn interpret_without_marker_is_sentinel() {
        let step = LeakCheck::new();
        let output = ActionOutput::new(0, None);
        assert_eq!(step.interpret(&context(), &output).code(), LEAK_SENTINEL);
    }
}
