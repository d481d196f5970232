//! Leak checker discovery and success-marker selection.
//!
//! Leak checkers report a clean run with a fixed sentence whose wording
//! depends on the tool. The sentence is chosen by probing the checker's own
//! `--version` text, and can be overridden from config.

use std::ffi::OsString;
use std::path::Path;

use super::probe::{Tool, ToolProbe};
use super::version::{extract_version, probe_version_text};

/// Printed by valgrind's memcheck when every allocation was released.
pub const VALGRIND_CLEAN_MARKER: &str = "All heap blocks were freed -- no leaks are possible";

/// Printed by macOS `leaks` when the process exits without leaks.
pub const MACOS_LEAKS_CLEAN_MARKER: &str = "0 leaks for 0 total leaked bytes";

/// Which leak checker was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeakCheckerKind {
    Valgrind,
    MacLeaks,
    Unknown,
}

impl LeakCheckerKind {
    /// Classify a checker from its version text, falling back to its name.
    pub fn detect(tool_name: &str, version_text: &str) -> Self {
        let lower = version_text.to_lowercase();
        if lower.contains("valgrind") {
            LeakCheckerKind::Valgrind
        } else if lower.contains("leaks") || tool_name == "leaks" {
            LeakCheckerKind::MacLeaks
        } else {
            LeakCheckerKind::Unknown
        }
    }

    /// The "no leaks" sentence this checker prints.
    ///
    /// Unknown checkers are assumed to be valgrind-compatible.
    pub fn clean_marker(&self) -> &'static str {
        match self {
            LeakCheckerKind::Valgrind | LeakCheckerKind::Unknown => VALGRIND_CLEAN_MARKER,
            LeakCheckerKind::MacLeaks => MACOS_LEAKS_CLEAN_MARKER,
        }
    }
}

/// A discovered leak checker with the marker its output is judged by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakChecker {
    pub tool: Tool,
    pub kind: LeakCheckerKind,
    pub version: Option<String>,
    pub marker: String,
}

impl LeakChecker {
    /// Build from an already-located tool and its version text.
    pub fn from_version_text(tool: Tool, text: &str, marker_override: Option<&str>) -> Self {
        let kind = LeakCheckerKind::detect(&tool.name, text);
        let marker = marker_override
            .map(str::to_string)
            .unwrap_or_else(|| kind.clean_marker().to_string());
        Self {
            tool,
            kind,
            version: extract_version(text),
            marker,
        }
    }

    /// Arguments that run `executable` under this checker.
    pub fn args_for(&self, executable: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self.kind {
            LeakCheckerKind::Valgrind => vec!["--leak-check=full".into()],
            LeakCheckerKind::MacLeaks => vec!["--atExit".into(), "--".into()],
            LeakCheckerKind::Unknown => Vec::new(),
        };
        args.push(executable.as_os_str().to_os_string());
        args
    }
}

/// Pick the first available leak checker and select its marker.
pub fn discover_leak_checker(
    probe: &dyn ToolProbe,
    candidates: &[String],
    marker_override: Option<&str>,
) -> Option<LeakChecker> {
    let tool = probe.locate_first(candidates)?;
    let text = probe_version_text(&tool.path).unwrap_or_default();
    let checker = LeakChecker::from_version_text(tool, &text, marker_override);
    tracing::info!(
        "Using leak checker {} ({:?}), clean marker {:?}",
        checker.tool.name,
        checker.kind,
        checker.marker
    );
    Some(checker)
}
