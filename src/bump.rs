use std::path::Path;

use crate::config::Config;
use crate::error::{Result, TagVerError};
use crate::git_ops::{GitRepo, RunMode};
use crate::hook::run_hook;
use crate::resolver;
use crate::sources::update_sources;
use crate::ui;

/// Which version component to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

/// Guarded version-bump workflow.
///
/// Validates preconditions (each gate a hard stop before any side
/// effect), computes the next version, rewrites declared sources, creates
/// an annotated tag and pushes it, then runs the optional hook command.
/// Without `commit` every mutating step is a dry run that only prints
/// what it would do. Once tagging starts in commit mode there is no
/// rollback; a failing push surfaces as a fatal error with the sources
/// already committed.
pub fn bump(config: &Config, project_root: &Path, what: BumpKind, commit: bool) -> Result<()> {
    if !config.is_tag_driven() {
        return Err(TagVerError::usage(
            "Project not configured to use tag-based versioning",
        ));
    }

    let repo = GitRepo::discover(project_root)?
        .ok_or_else(|| TagVerError::usage("Not in a git repository"))?;

    let branch = repo.current_branch()?;
    if branch != config.branch {
        return Err(TagVerError::usage(format!(
            "Can't bump branch '{}', need {}",
            branch, config.branch
        )));
    }

    let resolved = resolver::resolve(project_root, false)?
        .ok_or_else(|| TagVerError::usage("Could not determine version from git tags"))?;
    if resolved.broken {
        return Err(TagVerError::usage(format!(
            "Invalid git version tag: {}",
            resolved.text
        )));
    }
    if commit && resolved.dirty {
        return Err(TagVerError::usage(
            "You have pending git changes, can't bump",
        ));
    }

    let (major, minor, patch) = resolved.version.release_triple().ok_or_else(|| {
        TagVerError::usage(format!(
            "Could not extract major.minor.patch from '{}'",
            resolved.canonical
        ))
    })?;

    let (major, minor, patch) = match what {
        BumpKind::Major => (major + 1, 0, 0),
        BumpKind::Minor => (major, minor + 1, 0),
        BumpKind::Patch => {
            if resolved.auto_patch {
                return Err(TagVerError::usage(
                    "Can't bump patch number, it's auto-filled",
                ));
            }
            (major, minor, patch + 1)
        }
    };

    // Auto-patch projects keep short tags; the patch component stays
    // derived from the commit count
    let next_version = if resolved.auto_patch {
        format!("{}.{}", major, minor)
    } else {
        format!("{}.{}.{}", major, minor, patch)
    };

    if !commit {
        println!("Not committing bump, use --commit to commit");
    }

    let mode = RunMode::for_commit(commit);
    update_sources(&config.sources, project_root, &next_version, &repo, mode)?;

    let tag_name = format!("v{}", next_version);
    let message = format!("Version {}", next_version);
    repo.create_annotated_tag(&tag_name, &message, mode)?;
    repo.push_tag_and_branch(&config.remote, &branch, &tag_name, mode)?;

    if let Some(command) = config.hook_command() {
        run_hook(command, project_root, mode)?;
    }

    if !mode.is_dry_run() {
        ui::display_success(&format!("Bumped to {}", next_version));
    }

    Ok(())
}
