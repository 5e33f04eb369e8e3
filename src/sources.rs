use std::fs;
use std::path::{Path, PathBuf};

use crate::config::VersionSource;
use crate::error::Result;
use crate::git_ops::{GitRepo, RunMode};
use crate::ui;

/// Rewrite strategy for a version-declaration line, keyed by the
/// separator the line uses. New dialects get added here without touching
/// the bump workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// `version = '1.2.3',` — value quoted, trailing comma unless the key
    /// starts with an underscore (non-tuple-context assignment)
    Assignment,
    /// `Version: 1.2.3` — bare value
    KeyValue,
}

impl LineFormat {
    pub fn detect(line: &str) -> LineFormat {
        if line.contains('=') {
            LineFormat::Assignment
        } else {
            LineFormat::KeyValue
        }
    }

    /// Computes the revised line, preserving the key text exactly and one
    /// leading space before the value if the original had one.
    ///
    /// Returns None when the line has no separator or an empty key/value;
    /// callers report that as an unknown-format condition.
    pub fn rewrite(self, line: &str, next_version: &str) -> Option<String> {
        let sep = match self {
            LineFormat::Assignment => '=',
            LineFormat::KeyValue => ':',
        };

        let (key, value) = line.split_once(sep)?;
        if key.is_empty() || value.is_empty() {
            return None;
        }

        let replacement = match self {
            LineFormat::Assignment => {
                let mut quoted = format!("'{}'", next_version);
                if !line.trim_start().starts_with('_') {
                    quoted.push(',');
                }
                quoted
            }
            LineFormat::KeyValue => next_version.to_string(),
        };

        let space = if value.starts_with(' ') { " " } else { "" };
        Some(format!("{}{}{}{}\n", key, sep, space, replacement))
    }
}

/// The rewrite rules understand Python-style declarations only
fn is_recognized_source(path: &str) -> bool {
    Path::new(path).extension().is_some_and(|ext| ext == "py")
}

/// Rewrites the version literal in every recognized source location.
///
/// Sources whose line is already correct or in an unknown format are
/// reported and skipped; they never abort the operation. Returns the
/// relative paths that were (or in dry-run mode, would be) modified.
/// When anything was modified, exactly those files are staged and
/// committed as "Version {next_version}" through the given run mode.
pub fn update_sources(
    sources: &[VersionSource],
    project_root: &Path,
    next_version: &str,
    repo: &GitRepo,
    mode: RunMode,
) -> Result<Vec<PathBuf>> {
    let mut modified = Vec::new();

    for source in sources {
        if !is_recognized_source(&source.path) {
            continue;
        }

        let full_path = project_root.join(&source.path);
        let content = fs::read_to_string(&full_path)?;
        let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();

        let target = source.line.checked_sub(1).and_then(|i| lines.get(i).cloned());
        let revised = target
            .as_deref()
            .and_then(|line| LineFormat::detect(line).rewrite(line, next_version));

        match revised {
            None => {
                ui::display_warning(&format!(
                    "Unknown line format {}:{}",
                    source.path, source.line
                ));
            }
            Some(revised) if Some(revised.as_str()) == target.as_deref() => {
                ui::display_warning(&format!(
                    "{}:{} already has the right version",
                    source.path, source.line
                ));
            }
            Some(revised) => {
                if mode.is_dry_run() {
                    ui::display_status(&format!(
                        "Would update {}:{} with '{}'",
                        source.path,
                        source.line,
                        revised.trim()
                    ));
                } else {
                    lines[source.line - 1] = revised;
                    fs::write(&full_path, lines.concat())?;
                }
                modified.push(PathBuf::from(&source.path));
            }
        }
    }

    if !modified.is_empty() {
        repo.stage_and_commit(&modified, &format!("Version {}", next_version), mode)?;
    }

    Ok(modified)
}
