//! Tool presence probing.
//!
//! Tools are found by walking PATH entries directly rather than shelling out
//! to `which`/`command -v`, whose behaviour differs between systems and is
//! sometimes a shell builtin.
//!
//! # Example
//!
//! ```no_run
//! use cxxvet::tools::{PathProbe, ToolProbe};
//!
//! let probe = PathProbe::from_env();
//! if let Some(tool) = probe.locate("clang-format") {
//!     println!("formatter at {}", tool.path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// A located external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Name it was looked up by (e.g. "g++").
    pub name: String,
    /// Resolved executable path.
    pub path: PathBuf,
}

/// Answers "is this tool installed, and where".
pub trait ToolProbe {
    /// Locate a tool by name.
    fn locate(&self, name: &str) -> Option<Tool>;

    /// Locate the first available tool from a preference-ordered list.
    fn locate_first(&self, candidates: &[String]) -> Option<Tool> {
        candidates
            .iter()
            .filter(|name| !name.trim().is_empty())
            .find_map(|name| self.locate(name))
    }
}

/// Probe backed by a list of PATH directories.
#[derive(Debug, Clone, Default)]
pub struct PathProbe {
    entries: Vec<PathBuf>,
}

impl PathProbe {
    /// Probe the directories of the current `PATH`.
    pub fn from_env() -> Self {
        Self::new(parse_system_path())
    }

    /// Probe an explicit directory list.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// The directories searched, in order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl ToolProbe for PathProbe {
    fn locate(&self, name: &str) -> Option<Tool> {
        let found = resolve_tool_path(name, &self.entries);
        match &found {
            Some(path) => tracing::debug!("Found {} at {}", name, path.display()),
            None => tracing::debug!("{} not found on PATH", name),
        }
        found.map(|path| Tool {
            name: name.to_string(),
            path,
        })
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. A name containing
/// a path separator is checked as-is.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if tool.contains('/') || tool.contains('\\') {
        let path = PathBuf::from(tool);
        return (path.is_file() && is_executable(&path)).then_some(path);
    }

    for dir in path_entries {
        for file_name in file_names(tool) {
            let candidate = dir.join(file_name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn file_names(tool: &str) -> Vec<String> {
    vec![format!("{}.exe", tool), tool.to_string()]
}

#[cfg(not(windows))]
fn file_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}
