//! Source file discovery.
//!
//! Sources are the regular files (or symlinks to them) directly inside the
//! project root whose extension is in the configured list. Subdirectories
//! are not searched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CxxvetError, Result};

/// List source files in `root`, sorted by name, as paths relative to `root`.
pub fn discover_sources(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| CxxvetError::SourceScanFailed {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry?;
        // Follows symlinks; dangling links are skipped.
        if !entry.path().is_file() {
            continue;
        }
        let path = PathBuf::from(entry.file_name());
        if has_source_extension(&path, extensions) {
            sources.push(path);
        }
    }

    sources.sort();
    tracing::debug!("Found {} source file(s) in {}", sources.len(), root.display());
    Ok(sources)
}

/// Whether `path` ends in one of `extensions` (compared case-sensitively,
/// without the leading dot).
pub fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.trim_start_matches('.') == ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["cpp".to_string(), "cc".to_string()]
    }

    #[test]
    fn finds_matching_files_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.cpp"), "int main() {}").unwrap();
        fs::write(temp.path().join("b.cc"), "").unwrap();
        fs::write(temp.path().join("README.md"), "").unwrap();
        fs::write(temp.path().join("util.h"), "").unwrap();

        let sources = discover_sources(temp.path(), &exts()).unwrap();
        assert_eq!(
            sources,
            vec![PathBuf::from("b.cc"), PathBuf::from("main.cpp")]
        );
    }

    #[test]
    fn ignores_directories_and_nested_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("lib.cpp")).unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src").join("nested.cpp"), "").unwrap();

        let sources = discover_sources(temp.path(), &exts()).unwrap();
        assert!(sources.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_sources_are_included() {
        let temp = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let target = elsewhere.path().join("real.cpp");
        fs::write(&target, "int main() {}").unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("main.cpp")).unwrap();
        std::os::unix::fs::symlink(
            elsewhere.path().join("gone.cpp"),
            temp.path().join("dangling.cpp"),
        )
        .unwrap();

        let sources = discover_sources(temp.path(), &exts()).unwrap();
        assert_eq!(sources, vec![PathBuf::from("main.cpp")]);
    }

    #[test]
    fn missing_root_is_scan_error() {
        let temp = TempDir::new().unwrap();
        let err = discover_sources(&temp.path().join("gone"), &exts()).unwrap_err();
        assert!(matches!(err, CxxvetError::SourceScanFailed { .. }));
    }

    #[test]
    fn extension_match_tolerates_leading_dot() {
        let extensions = vec![".cxx".to_string()];
        assert!(has_source_extension(Path::new("a.cxx"), &extensions));
        assert!(!has_source_extension(Path::new("a.CXX"), &extensions));
        assert!(!has_source_extension(Path::new("cxx"), &extensions));
    }
}
