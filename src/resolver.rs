use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::git_ops::GitRepo;
use crate::version::Version;

/// Resolves the project version from git describe, or optionally from
/// packaged metadata when no describe output is available.
///
/// Returns `Ok(None)` when neither source produced anything; that is a
/// normal outcome for projects without tags, not an error.
pub fn resolve(project_root: &Path, allow_package_fallback: bool) -> Result<Option<Version>> {
    let mut raw: Option<String> = None;

    if let Some(repo) = GitRepo::discover(project_root)? {
        if let Some(text) = repo.describe() {
            // git sometimes reports -dirty when run from temp build folders
            let tree_clean = !repo.has_uncommitted_changes()?;
            raw = Some(corrected_describe(text, tree_clean));
        }
    }

    if raw.is_none() && allow_package_fallback {
        raw = pkg_info_version(project_root)?;
    }

    Ok(raw
        .filter(|text| !text.trim().is_empty())
        .map(|text| Version::parse(&text)))
}

/// Strips a spurious -dirty marker: the working tree is actually clean,
/// so the marker is a describe artifact and must not survive parsing.
fn corrected_describe(text: String, tree_clean: bool) -> String {
    if tree_clean && text.contains("-dirty") {
        text.replace("-dirty", "")
    } else {
        text
    }
}

/// Reads the `Version:` field from a PKG-INFO file at the project root
/// and marks it with a trailing `P` so consumers can tell the version was
/// resolved from packaged metadata rather than from git.
fn pkg_info_version(project_root: &Path) -> Result<Option<String>> {
    let full_path = project_root.join("PKG-INFO");
    if !full_path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(full_path)?;
    for line in content.lines() {
        if line.starts_with("Version:") {
            let mut fields = line.split_whitespace();
            fields.next();
            if let Some(value) = fields.next() {
                return Ok(Some(format!("{}P", value)));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_corrected_describe_strips_spurious_dirty() {
        assert_eq!(
            corrected_describe("v1.2.3-dirty".to_string(), true),
            "v1.2.3"
        );
        assert_eq!(
            corrected_describe("v1.4-7-gdead-dirty".to_string(), true),
            "v1.4-7-gdead"
        );
    }

    #[test]
    fn test_corrected_describe_keeps_real_dirty() {
        assert_eq!(
            corrected_describe("v1.2.3-dirty".to_string(), false),
            "v1.2.3-dirty"
        );
    }

    #[test]
    fn test_corrected_describe_noop_when_clean() {
        assert_eq!(corrected_describe("v1.2.3".to_string(), true), "v1.2.3");
    }

    #[test]
    fn test_pkg_info_version() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("PKG-INFO")).unwrap();
        writeln!(file, "Metadata-Version: 1.1").unwrap();
        writeln!(file, "Name: some-project").unwrap();
        writeln!(file, "Version: 1.2.3").unwrap();
        drop(file);

        let value = pkg_info_version(dir.path()).unwrap();
        assert_eq!(value.as_deref(), Some("1.2.3P"));
    }

    #[test]
    fn test_pkg_info_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(pkg_info_version(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_pkg_info_without_version_field() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PKG-INFO"), "Name: some-project\n").unwrap();
        assert_eq!(pkg_info_version(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_resolve_outside_repository_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let version = resolve(dir.path(), false).unwrap();
        assert!(version.is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_pkg_info() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PKG-INFO"), "Version: 0.9.1\n").unwrap();

        let version = resolve(dir.path(), true).unwrap().unwrap();
        assert_eq!(version.canonical, "0.9.1P");
    }
}
