//! C++ compiler discovery.

use super::probe::{Tool, ToolProbe};
use super::version::{extract_version, probe_version_text};

const CLANG_ANALYZE_ARGS: &[&str] = &["--analyze", "-Xanalyzer", "-analyzer-output=text"];

/// Compiler family, derived from `--version` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerFamily {
    Clang,
    Gcc,
    Unknown,
}

impl CompilerFamily {
    /// Classify a compiler from its version banner.
    pub fn from_version_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("clang") {
            CompilerFamily::Clang
        } else if lower.contains("gcc")
            || lower.contains("g++")
            || lower.contains("free software foundation")
        {
            CompilerFamily::Gcc
        } else {
            CompilerFamily::Unknown
        }
    }

    /// Arguments that run the compiler's built-in static analyzer, if any.
    ///
    /// Only Clang ships one that reports through ordinary diagnostics.
    pub fn analysis_args(&self) -> Option<&'static [&'static str]> {
        match self {
            CompilerFamily::Clang => Some(CLANG_ANALYZE_ARGS),
            CompilerFamily::Gcc | CompilerFamily::Unknown => None,
        }
    }

    /// Whether [`analysis_args`](Self::analysis_args) is available.
    pub fn supports_static_analysis(&self) -> bool {
        self.analysis_args().is_some()
    }
}

impl std::fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompilerFamily::Clang => "clang",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// A discovered compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    pub tool: Tool,
    pub family: CompilerFamily,
    pub version: Option<String>,
}

impl Compiler {
    /// Classify an already-located tool from its version banner.
    pub fn from_version_text(tool: Tool, text: &str) -> Self {
        Self {
            tool,
            family: CompilerFamily::from_version_text(text),
            version: extract_version(text),
        }
    }

    /// One-line description for banners.
    pub fn describe(&self) -> String {
        match &self.version {
            Some(v) => format!("{} ({} {})", self.tool.name, self.family, v),
            None => format!("{} ({})", self.tool.name, self.family),
        }
    }
}

/// Pick the first available compiler from a preference-ordered list.
pub fn discover_compiler(probe: &dyn ToolProbe, candidates: &[String]) -> Option<Compiler> {
    let tool = probe.locate_first(candidates)?;
    let text = probe_version_text(&tool.path).unwrap_or_default();
    let compiler = Compiler::from_version_text(tool, &text);
    tracing::info!("Using compiler {}", compiler.describe());
    Some(compiler)
}
