//! Version probing.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::shell::execute_quiet;

static VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)"]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Run `<tool> --version` and return its combined output.
///
/// Returns `None` if the tool cannot be started. A nonzero exit still
/// yields text: some tools print their banner and exit 1 on `--version`.
pub fn probe_version_text(tool: &Path) -> Option<String> {
    match execute_quiet(tool, &["--version"], None) {
        Ok(result) => Some(result.combined_output()),
        Err(e) => {
            tracing::debug!("Version probe failed for {}: {}", tool.display(), e);
            None
        }
    }
}

/// Extract a version number from command output.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_PATTERNS.iter().find_map(|re| {
        re.captures(output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}
