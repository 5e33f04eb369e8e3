use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ui;

/// How external effects are performed.
///
/// Threaded explicitly through every mutating git operation and the
/// post-bump hook instead of living in ambient process state, so the
/// dry-run/fatal distinction stays testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Print the intended command, perform nothing
    DryRun,
    /// Execute; failures are fatal and surface to the caller
    Commit,
}

impl RunMode {
    pub fn for_commit(commit: bool) -> Self {
        if commit {
            RunMode::Commit
        } else {
            RunMode::DryRun
        }
    }

    pub fn is_dry_run(self) -> bool {
        matches!(self, RunMode::DryRun)
    }
}

/// Wrapper around git2 Repository for the queries and operations tagver
/// needs.
///
/// Read-only queries (describe, diff check, branch name) always execute.
/// Mutating operations take a [RunMode] and do nothing beyond printing in
/// dry-run mode.
pub struct GitRepo {
    repo: git2::Repository,
}

impl GitRepo {
    /// Discovers the git repository at or above `path`.
    ///
    /// Returns `Ok(None)` when there is no repository; callers treat that
    /// as "no VCS metadata available" rather than an error.
    pub fn discover(path: &Path) -> Result<Option<Self>> {
        match git2::Repository::discover(path) {
            Ok(repo) => Ok(Some(GitRepo { repo })),
            Err(_) => Ok(None),
        }
    }

    /// Equivalent of `git describe --tags --dirty --first-parent`.
    ///
    /// Returns None when git cannot produce a description (no tags, empty
    /// repository, unborn HEAD).
    pub fn describe(&self) -> Option<String> {
        let mut opts = git2::DescribeOptions::new();
        opts.describe_tags();
        opts.only_follow_first_parent(true);
        let describe = self.repo.describe(&opts).ok()?;

        let mut format = git2::DescribeFormatOptions::new();
        format.dirty_suffix("-dirty");
        describe.format(Some(&format)).ok()
    }

    /// Equivalent of `git diff --quiet --ignore-submodules`: true when the
    /// working tree differs from the index.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut opts = git2::DiffOptions::new();
        opts.ignore_submodules(true);
        let diff = self.repo.diff_index_to_workdir(None, Some(&mut opts))?;
        Ok(diff.deltas().count() > 0)
    }

    /// Short name of the branch HEAD points at (e.g. "master").
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// Creates an annotated tag on the current HEAD commit.
    pub fn create_annotated_tag(&self, name: &str, message: &str, mode: RunMode) -> Result<()> {
        if mode.is_dry_run() {
            ui::display_status(&format!("Would run: git tag -a {} -m \"{}\"", name, message));
            return Ok(());
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    /// Pushes the branch and the freshly created tag to a remote.
    ///
    /// Attempts SSH authentication from ~/.ssh keys or the SSH agent when
    /// the remote requires it.
    pub fn push_tag_and_branch(
        &self,
        remote_name: &str,
        branch: &str,
        tag_name: &str,
        mode: RunMode,
    ) -> Result<()> {
        if mode.is_dry_run() {
            ui::display_status(&format!(
                "Would run: git push --tags {} {}",
                remote_name, branch
            ));
            return Ok(());
        }

        let mut remote = self.repo.find_remote(remote_name)?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Catch per-reference rejections during push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let branch_ref = format!("refs/heads/{}", branch);
        let tag_ref = format!("refs/tags/{}", tag_name);
        remote.push(
            &[branch_ref.as_str(), tag_ref.as_str()],
            Some(&mut push_options),
        )?;
        Ok(())
    }

    /// Stages exactly `paths` (relative to the work tree) and creates a
    /// single commit with `message` on HEAD.
    pub fn stage_and_commit(&self, paths: &[PathBuf], message: &str, mode: RunMode) -> Result<()> {
        if mode.is_dry_run() {
            let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            ui::display_status(&format!("Would run: git add {}", listed.join(" ")));
            ui::display_status(&format!("Would run: git commit -m \"{}\"", message));
            return Ok(());
        }

        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&head])?;
        Ok(())
    }
}
