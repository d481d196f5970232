//! Configuration schema definitions for cxxvet.
//!
//! These structs map to the optional `.cxxvet.yml` file. Every section has
//! defaults, so an empty or missing file yields a fully usable config.

use serde::{Deserialize, Serialize};

/// Root configuration structure for `.cxxvet.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VetConfig {
    /// Which files count as sources
    pub sources: SourcesConfig,

    /// Compiler discovery and build flags
    pub build: BuildConfig,

    /// Instrumented rebuild settings
    pub sanitizer: SanitizerConfig,

    /// Static lint tool
    pub lint: LintConfig,

    /// Formatter check
    pub format: FormatConfig,

    /// Leak checker and its success marker
    pub leak_check: LeakCheckConfig,

    /// Compiler-driven static analysis
    pub static_analysis: StaticAnalysisConfig,

    /// Fold informational steps (format, sanitizer) into the exit code
    #[serde(skip_serializing_if = "is_false")]
    pub strict: bool,
}

/// Source file selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// File extensions (without the dot) treated as sources
    pub extensions: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            extensions: strings(&["cpp", "cc", "cxx"]),
        }
    }
}

/// Compiler discovery and build settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Compiler candidates in preference order
    pub compilers: Vec<String>,

    /// Language standard passed as `-std=`
    pub std: String,

    /// Extra compiler flags
    pub flags: Vec<String>,

    /// Executable name, relative to the project root
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compilers: strings(&["clang++", "g++", "c++"]),
            std: "c++17".to_string(),
            flags: strings(&["-Wall", "-Wextra", "-pedantic"]),
            output: "cxxvet.out".to_string(),
        }
    }
}

/// Sanitizer-instrumented rebuild settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizerConfig {
    /// Instrumentation flags appended to the build flags
    pub flags: Vec<String>,

    /// Instrumented executable name, relative to the project root
    pub output: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            flags: strings(&[
                "-fsanitize=address,undefined",
                "-fno-omit-frame-pointer",
                "-g",
            ]),
            output: "cxxvet_asan.out".to_string(),
        }
    }
}

/// Static lint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Lint executable name
    pub tool: String,

    /// Arguments placed before the source list
    pub args: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            tool: "cppcheck".to_string(),
            args: strings(&[
                "--enable=warning,style,performance,portability",
                "--error-exitcode=1",
                "--quiet",
            ]),
        }
    }
}

/// Formatter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Formatter executable name
    pub tool: String,

    /// Base style used when the project has no `.clang-format`
    pub style: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            tool: "clang-format".to_string(),
            style: "Google".to_string(),
        }
    }
}

/// Leak checker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeakCheckConfig {
    /// Leak checker candidates in preference order
    pub tools: Vec<String>,

    /// Success marker; overrides the marker chosen from the tool's version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Default for LeakCheckConfig {
    fn default() -> Self {
        Self {
            tools: strings(&["valgrind", "leaks"]),
            marker: None,
        }
    }
}

/// Static analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAnalysisConfig {
    /// Text whose presence in the analyzer output fails the step
    pub warning_marker: String,
}

impl Default for StaticAnalysisConfig {
    fn default() -> Self {
        Self {
            warning_marker: "warning".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn is_false(b: &bool) -> bool {
    !*b
}
