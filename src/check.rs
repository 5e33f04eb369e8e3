use crate::config::VersionSource;
use crate::version::Version;

/// Compares the declared version literal of the first configured source
/// against the resolved canonical version.
///
/// The declared literal is expected to be a prefix of the canonical
/// version (a short `1.2` declaration is fine for canonical `1.2.5`).
/// Returns a warning message on mismatch, None when everything agrees or
/// no literal is declared.
pub fn verify_declared(version: &Version, sources: &[VersionSource]) -> Option<String> {
    let source = sources.first()?;
    let declared = source.value.as_ref()?;

    if version.canonical.starts_with(declared.as_str()) {
        return None;
    }

    let expected = version
        .canonical
        .get(..declared.len())
        .unwrap_or(&version.canonical);
    Some(format!(
        "In {}:{} version should be {}, not {}",
        source.path, source.line, expected, declared
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(value: Option<&str>) -> VersionSource {
        VersionSource {
            path: "pkg/__init__.py".to_string(),
            line: 3,
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_matching_prefix_passes() {
        let version = Version::parse("v1.2.3-5-gabc123");
        assert_eq!(verify_declared(&version, &[source(Some("1.2.3"))]), None);
        assert_eq!(verify_declared(&version, &[source(Some("1.2"))]), None);
    }

    #[test]
    fn test_mismatch_warns_with_expected_prefix() {
        let version = Version::parse("v1.2.3");
        let warning = verify_declared(&version, &[source(Some("1.1.0"))]).unwrap();
        assert_eq!(
            warning,
            "In pkg/__init__.py:3 version should be 1.2.3, not 1.1.0"
        );
    }

    #[test]
    fn test_no_declared_value_passes() {
        let version = Version::parse("v1.2.3");
        assert_eq!(verify_declared(&version, &[source(None)]), None);
        assert_eq!(verify_declared(&version, &[]), None);
    }

    #[test]
    fn test_declared_longer_than_canonical() {
        let version = Version::parse("v1.2");
        let warning = verify_declared(&version, &[source(Some("1.2.3.4.5"))]).unwrap();
        assert!(warning.contains("not 1.2.3.4.5"));
    }
}
