use std::path::Path;
use std::process::Command;

use crate::error::{Result, TagVerError};
use crate::git_ops::RunMode;
use crate::ui;

/// Runs the post-bump hook command configured via the "+" suffix of the
/// versioning strategy.
///
/// Output passes straight through to the terminal. A non-zero exit is
/// fatal in commit mode; dry-run only prints the command.
pub fn run_hook(command: &str, project_root: &Path, mode: RunMode) -> Result<()> {
    if mode.is_dry_run() {
        ui::display_status(&format!("Would run: {}", command));
        return Ok(());
    }

    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| TagVerError::hook("empty hook command"))?;

    let status = Command::new(program)
        .args(parts)
        .current_dir(project_root)
        .status()
        .map_err(|e| TagVerError::hook(format!("Failed to execute '{}': {}", command, e)))?;

    if !status.success() {
        return Err(TagVerError::hook(format!(
            "'{}' exited with code {}",
            command,
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}
