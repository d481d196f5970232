//! Runs the standard step sequence through the library API against fake tools.
#![cfg(unix)]

mod common;

use common::Sandbox;
use cxxvet::config::VetConfig;
use cxxvet::runner::{StepRunner, StepStatus};
use cxxvet::sources::discover_sources;
use cxxvet::steps::catalog::{default_steps, LeakCheck};
use cxxvet::steps::{MarkerOracle, Outcome, RunContext, Step};
use cxxvet::tools::PathProbe;

fn context(sandbox: &Sandbox, config: VetConfig) -> RunContext {
    let sources = discover_sources(sandbox.root(), &config.sources.extensions).unwrap();
    RunContext::with_probe(
        sandbox.root(),
        config,
        sources,
        Box::new(PathProbe::new(vec![sandbox.bin_dir()])),
    )
}

fn status_of(report: &cxxvet::runner::RunReport, name: &str) -> StepStatus {
    report
        .steps
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.status)
        .unwrap()
}

#[test]
fn gcc_project_skips_clang_only_analysis() {
    let sandbox = Sandbox::new();
    sandbox
        .write_source("main.cpp", "int main() {}\n")
        .compiler("g++", "g++ (GCC) 13.2.0", 0);

    let config = VetConfig::default();
    let steps = default_steps(&config);
    let mut ctx = context(&sandbox, config);
    let report = StepRunner::new().run(&steps, &mut ctx);

    assert_eq!(report.exit_code, 0);
    assert_eq!(status_of(&report, "build"), StepStatus::Passed);
    assert_eq!(status_of(&report, "run"), StepStatus::Passed);
    assert_eq!(status_of(&report, "sanitizer-run"), StepStatus::Passed);
    assert_eq!(status_of(&report, "static-analysis"), StepStatus::Skipped);
    assert_eq!(status_of(&report, "lint"), StepStatus::Skipped);
    assert_eq!(status_of(&report, "cleanup"), StepStatus::Passed);
    assert!(ctx.executable.is_none());
}

#[test]
fn empty_project_skips_everything_source_driven() {
    let sandbox = Sandbox::new();
    sandbox.compiler("g++", "g++ (GCC) 13.2.0", 0).lint(1);

    let config = VetConfig::default();
    let steps = default_steps(&config);
    let mut ctx = context(&sandbox, config);
    let report = StepRunner::new().run(&steps, &mut ctx);

    assert_eq!(report.exit_code, 0);
    assert_eq!(status_of(&report, "build"), StepStatus::Skipped);
    assert_eq!(status_of(&report, "lint"), StepStatus::Skipped);
    assert_eq!(status_of(&report, "leak-check"), StepStatus::Skipped);
}

#[test]
fn failed_sanitizer_build_warns_without_counting() {
    let sandbox = Sandbox::new();
    sandbox.write_source("main.cpp", "int main() {}\n");
    // Plain builds succeed; instrumented ones fail.
    sandbox.tool(
        "g++",
        "if [ \"$1\" = \"--version\" ]; then echo \"g++ (GCC) 13.2.0\"; exit 0; fi\n\
         for arg in \"$@\"; do\n\
           case \"$arg\" in -fsanitize=*) echo \"cannot find libasan\" >&2; exit 1;; esac\n\
         done\n\
         out=\"\"\n\
         while [ $# -gt 0 ]; do\n\
           if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n\
           shift\n\
         done\n\
         printf '#!/bin/sh\\nexit 0\\n' > \"$out\"\n\
         /bin/chmod +x \"$out\"",
    );

    let config = VetConfig::default();
    let steps = default_steps(&config);

    let mut ctx = context(&sandbox, config.clone());
    let report = StepRunner::new().run(&steps, &mut ctx);
    assert_eq!(report.exit_code, 0);
    assert_eq!(status_of(&report, "sanitizer-build"), StepStatus::Warned);
    assert_eq!(status_of(&report, "sanitizer-run"), StepStatus::Skipped);

    let mut ctx = context(&sandbox, config);
    let report = StepRunner::new().strict(true).run(&steps, &mut ctx);
    assert_eq!(report.exit_code, 1);
    assert_eq!(
        report.deciding_step().map(|s| s.name.as_str()),
        Some("sanitizer-build")
    );
}

#[test]
fn leak_check_accepts_injected_oracle() {
    let sandbox = Sandbox::new();
    sandbox
        .write_source("main.cpp", "int main() {}\n")
        .compiler("g++", "g++ (GCC) 13.2.0", 0)
        .valgrind("ERROR SUMMARY: 0 errors from 0 contexts");

    let config = VetConfig::default();
    let steps: Vec<Box<dyn Step>> = vec![
        Box::new(cxxvet::steps::catalog::CompilerDiscovery),
        Box::new(cxxvet::steps::catalog::Build),
        Box::new(LeakCheck::with_oracle(Box::new(MarkerOracle::must_contain(
            "0 errors from 0 contexts",
            cxxvet::steps::LEAK_SENTINEL,
        )))),
        Box::new(cxxvet::steps::catalog::Cleanup),
    ];
    let mut ctx = context(&sandbox, config);
    let report = StepRunner::new().run(&steps, &mut ctx);

    assert_eq!(report.exit_code, 0);
    let leak = report.steps.iter().find(|s| s.name == "leak-check").unwrap();
    assert_eq!(leak.outcome, Outcome::Success);
}

#[test]
fn one_step_list_serves_runs_with_different_tools() {
    let config = VetConfig::default();
    let steps = default_steps(&config);

    let without_checker = Sandbox::new();
    without_checker
        .write_source("main.cpp", "int main() {}\n")
        .compiler("g++", "g++ (GCC) 13.2.0", 0);
    let mut ctx = context(&without_checker, config.clone());
    let first = StepRunner::new().run(&steps, &mut ctx);
    assert_eq!(status_of(&first, "leak-check"), StepStatus::Skipped);
    assert_eq!(first.exit_code, 0);

    let leaky = Sandbox::new();
    leaky
        .write_source("main.cpp", "int main() {}\n")
        .compiler("g++", "g++ (GCC) 13.2.0", 0)
        .valgrind("definitely lost: 48 bytes in 1 blocks");
    let mut ctx = context(&leaky, config.clone());
    let second = StepRunner::new().run(&steps, &mut ctx);
    assert_eq!(status_of(&second, "leak-check"), StepStatus::Failed);
    assert_eq!(second.exit_code, 111);

    let clean = Sandbox::new();
    clean
        .write_source("main.cpp", "int main() {}\n")
        .compiler("g++", "g++ (GCC) 13.2.0", 0)
        .valgrind("All heap blocks were freed -- no leaks are possible");
    let mut ctx = context(&clean, config);
    let third = StepRunner::new().run(&steps, &mut ctx);
    assert_eq!(status_of(&third, "leak-check"), StepStatus::Passed);
    assert_eq!(third.exit_code, 0);
}

#[test]
fn configured_output_name_is_cleaned_up() {
    let sandbox = Sandbox::new();
    sandbox
        .write_source("main.cpp", "int main() {}\n")
        .compiler("g++", "g++ (GCC) 13.2.0", 0)
        .write_config("build:\n  output: app.bin\n");

    let config = cxxvet::config::load_config(sandbox.root(), None).unwrap();
    assert_eq!(config.build.output, "app.bin");
    let steps = default_steps(&config);
    let mut ctx = context(&sandbox, config);
    let report = StepRunner::new().run(&steps, &mut ctx);

    assert_eq!(report.exit_code, 0);
    assert!(!sandbox.root().join("app.bin").exists());
}
