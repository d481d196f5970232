//! Shared state for one run.
//!
//! Later steps depend on what earlier ones produced (the discovered
//! compiler, the built executable), so the runner threads one
//! [`RunContext`] through the whole sequence.

use std::path::{Path, PathBuf};

use crate::config::VetConfig;
use crate::shell::CommandOptions;
use crate::tools::{Compiler, LeakChecker, PathProbe, ToolProbe};

/// State shared across the steps of a single run.
pub struct RunContext {
    project_root: PathBuf,
    config: VetConfig,
    sources: Vec<PathBuf>,
    probe: Box<dyn ToolProbe>,
    artifacts: Vec<PathBuf>,
    keep_artifacts: bool,

    /// Compiler picked by the discovery step.
    pub compiler: Option<Compiler>,
    /// Executable produced by a successful build.
    pub executable: Option<PathBuf>,
    /// Executable produced by a successful sanitizer build.
    pub sanitized_executable: Option<PathBuf>,
    /// Leak checker the leak check ran under, with its clean marker.
    pub leak_checker: Option<LeakChecker>,
}

impl RunContext {
    /// Create a context that probes the real `PATH`.
    pub fn new(project_root: &Path, config: VetConfig, sources: Vec<PathBuf>) -> Self {
        Self::with_probe(
            project_root,
            config,
            sources,
            Box::new(PathProbe::from_env()),
        )
    }

    /// Create a context with a custom tool probe.
    pub fn with_probe(
        project_root: &Path,
        config: VetConfig,
        sources: Vec<PathBuf>,
        probe: Box<dyn ToolProbe>,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            sources,
            probe,
            artifacts: Vec::new(),
            keep_artifacts: false,
            compiler: None,
            executable: None,
            sanitized_executable: None,
            leak_checker: None,
        }
    }

    /// Leave generated files in place after the run.
    pub fn keep_artifacts(mut self, keep: bool) -> Self {
        self.keep_artifacts = keep;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &VetConfig {
        &self.config
    }

    /// Source files, relative to the project root.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn probe(&self) -> &dyn ToolProbe {
        self.probe.as_ref()
    }

    pub fn keeps_artifacts(&self) -> bool {
        self.keep_artifacts
    }

    /// Absolute path a project-relative name resolves to.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Options for running a tool in the project root with output captured.
    pub fn command_options(&self) -> CommandOptions {
        CommandOptions::captured(&self.project_root)
    }

    /// Record a file this run created so cleanup removes it.
    ///
    /// Registering the same path twice is a no-op.
    pub fn register_artifact(&mut self, path: PathBuf) {
        if !self.artifacts.contains(&path) {
            tracing::debug!("Registered artifact {}", path.display());
            self.artifacts.push(path);
        }
    }

    /// Files registered for cleanup, in registration order.
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }

    /// Hand the registered artifacts over to cleanup.
    pub fn take_artifacts(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.artifacts)
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("project_root", &self.project_root)
            .field("sources", &self.sources)
            .field("artifacts", &self.artifacts)
            .field("compiler", &self.compiler)
            .field("executable", &self.executable)
            .field("leak_checker", &self.leak_checker)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RunContext {
        RunContext::with_probe(
            Path::new("/project"),
            VetConfig::default(),
            vec![PathBuf::from("main.cpp")],
            Box::new(PathProbe::default()),
        )
    }

    #[test]
    fn resolve_joins_project_root() {
        let ctx = context();
        assert_eq!(ctx.resolve("cxxvet.out"), PathBuf::from("/project/cxxvet.out"));
    }

    #[test]
    fn register_artifact_deduplicates() {
        let mut ctx = context();
        ctx.register_artifact(PathBuf::from("/project/a.out"));
        ctx.register_artifact(PathBuf::from("/project/a.out"));
        assert_eq!(ctx.artifacts().len(), 1);
    }

    #[test]
    fn take_artifacts_empties_list() {
        let mut ctx = context();
        ctx.register_artifact(PathBuf::from("/project/a.out"));
        let taken = ctx.take_artifacts();
        assert_eq!(taken.len(), 1);
        assert!(ctx.artifacts().is_empty());
    }

    #[test]
    fn command_options_capture_in_root() {
        let options = context().command_options();
        assert!(options.capture_stdout);
        assert!(options.capture_stderr);
        assert_eq!(options.cwd, Some(PathBuf::from("/project")));
    }

    #[test]
    fn keep_artifacts_flag() {
        assert!(!context().keeps_artifacts());
        assert!(context().keep_artifacts(true).keeps_artifacts());
    }
}
