use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::{execute, CommandOptions};
use crate::steps::context::RunContext;
use crate::steps::step::{Accumulation, ActionOutput, Availability, Step};
use crate::tools::Tool;

/// Style files clang-format picks up with `--style=file`.
const STYLE_FILES: &[&str] = &[".clang-format", "_clang-format"];

/// Diffs each source against its formatted version.
///
/// Informational: differences are printed but do not fail the run.
pub struct FormatCheck;

impl Step for FormatCheck {
    fn name(&self) -> &str {
        "format-check"
    }

    fn description(&self) -> &str {
        "Check formatting"
    }

    fn availability(&self, ctx: &RunContext) -> Availability {
        let tool = &ctx.config().format.tool;
        if ctx.probe().locate(tool).is_none() {
            return Availability::Unavailable(format!("{} not found on PATH", tool));
        }
        if ctx.sources().is_empty() {
            return Availability::NotApplicable("no source files".to_string());
        }
        Availability::Available
    }

    fn run(&self, ctx: &mut RunContext) -> Result<ActionOutput> {
        let Some(tool) = ctx.probe().locate(&ctx.config().format.tool) else {
            return Ok(ActionOutput::report("formatter disappeared from PATH"));
        };

        let style_arg = ensure_style_file(ctx, &tool);
        let options = ctx.command_options();
        let mut report = Vec::new();
        let mut exit_code = 0;
        let mut differing = 0;

        for source in ctx.sources() {
            let file = source.to_string_lossy();
            let args = [style_arg.as_str(), file.as_ref()];
            let result = execute(&tool.path, &args, &options)?;
            if !result.success {
                exit_code = result.status_code();
                report.push(format!(
                    "{}: {} exited with {}\n{}",
                    source.display(),
                    tool.name,
                    exit_code,
                    result.stderr.trim_end()
                ));
                continue;
            }

            let original = read_lossy(&ctx.project_root().join(source))?;
            if let Some(region) = changed_region(&original, &result.stdout) {
                differing += 1;
                report.push(region.render(&source.display().to_string()));
            }
        }

        if differing == 0 && exit_code == 0 {
            report.push(format!("{} file(s) already formatted", ctx.sources().len()));
        } else if differing > 0 {
            report.push(format!("{} file(s) need formatting", differing));
            if exit_code == 0 {
                exit_code = 1;
            }
        }

        Ok(ActionOutput::report(report.join("\n")).with_exit_code(exit_code))
    }

    fn accumulation(&self) -> Accumulation {
        Accumulation::Informational
    }
}

/// The style file clang-format would pick up for files in `root`.
///
/// clang-format searches the file's directory and then each parent, so a
/// style file above the project root applies too.
fn find_style_file(root: &Path) -> Option<PathBuf> {
    root.ancestors()
        .flat_map(|dir| STYLE_FILES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Make sure `--style=file` has something to read.
///
/// When neither the project nor any parent directory has a style file, one
/// is generated from the configured base style and registered for cleanup.
/// Returns the `--style` argument to use.
fn ensure_style_file(ctx: &mut RunContext, tool: &Tool) -> String {
    let root = ctx.project_root().to_path_buf();
    if let Some(existing) = find_style_file(&root) {
        tracing::debug!("Using style file {}", existing.display());
        return "--style=file".to_string();
    }

    let style = ctx.config().format.style.clone();
    let inline = format!("--style={}", style);
    let dump = execute(
        &tool.path,
        &[inline.as_str(), "--dump-config"],
        &CommandOptions::captured(&root),
    );

    match dump {
        Ok(result) if result.success && !result.stdout.is_empty() => {
            let path = root.join(STYLE_FILES[0]);
            match fs::write(&path, &result.stdout) {
                Ok(()) => {
                    tracing::debug!("Generated {} from style {}", path.display(), style);
                    ctx.register_artifact(path);
                    "--style=file".to_string()
                }
                Err(e) => {
                    tracing::warn!("Could not write {}: {}", path.display(), e);
                    inline
                }
            }
        }
        _ => inline,
    }
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The span of lines that differ between two texts.
///
/// Common leading and trailing lines are trimmed; what remains is reported
/// as one block of removed lines and one block of added lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedRegion {
    /// 1-based line in the original where the difference starts.
    pub line: usize,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl ChangedRegion {
    /// Render as a unified-diff-like hunk.
    pub fn render(&self, file: &str) -> String {
        let mut out = format!(
            "--- {file}\n+++ {file} (formatted)\n@@ line {} @@",
            self.line,
            file = file
        );
        for line in &self.removed {
            out.push_str("\n-");
            out.push_str(line);
        }
        for line in &self.added {
            out.push_str("\n+");
            out.push_str(line);
        }
        out
    }
}

/// Compare two texts line by line; `None` when they are identical.
pub fn changed_region(original: &str, formatted: &str) -> Option<ChangedRegion> {
    if original == formatted {
        return None;
    }
    if let Some(region) = line_ending_change(original, formatted) {
        return Some(region);
    }

    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = formatted.lines().collect();

    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let removed: Vec<String> = old[prefix..old.len() - suffix]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let added: Vec<String> = new[prefix..new.len() - suffix]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // Only a trailing newline differs.
    if removed.is_empty() && added.is_empty() {
        return Some(ChangedRegion {
            line: old.len().max(1),
            removed: vec!["\\ newline at end of file".to_string()],
            added: Vec::new(),
        });
    }

    Some(ChangedRegion {
        line: prefix + 1,
        removed,
        added,
    })
}

/// A change that only converts line endings (CRLF and LF).
///
/// `str::lines` drops the `\r`, so such changes are invisible line by line.
fn line_ending_change(original: &str, formatted: &str) -> Option<ChangedRegion> {
    if original.replace("\r\n", "\n") != formatted.replace("\r\n", "\n") {
        return None;
    }
    let line = original
        .split('\n')
        .zip(formatted.split('\n'))
        .position(|(a, b)| a != b)
        .unwrap_or(0)
        + 1;
    let (from, to) = if original.contains("\r\n") {
        ("CRLF", "LF")
    } else {
        ("LF", "CRLF")
    };
    Some(ChangedRegion {
        line,
        removed: vec![format!("\\ line endings {}", from)],
        added: vec![format!("\\ line endings {}", to)],
    })
}
