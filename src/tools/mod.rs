//! External tool discovery.
//!
//! Every check cxxvet performs is delegated to an external program. This
//! module answers "is it installed, where, and which flavour is it":
//!
//! - [`probe`] - PATH lookup behind the [`ToolProbe`] trait
//! - [`version`] - `--version` probing and version extraction
//! - [`compiler`] - compiler discovery and family detection
//! - [`leak`] - leak checker discovery and success-marker selection

pub mod compiler;
pub mod leak;
pub mod probe;
pub mod version;

pub use compiler::{discover_compiler, Compiler, CompilerFamily};
pub use leak::{discover_leak_checker, LeakChecker, LeakCheckerKind};
pub use probe::{is_executable, parse_system_path, resolve_tool_path, PathProbe, Tool, ToolProbe};
pub use version::{extract_version, probe_version_text};
