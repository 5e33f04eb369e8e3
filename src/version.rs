use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::loose::LooseVersion;

/// Output expected from git describe:
/// `<main>(-<changes>)?(-g<commit>)?(-(dirty|broken))*`
fn describe_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^v?(.+?)(-\d+)?(-g(\w+))?(-(dirty|broken))*$")
            .expect("describe grammar regex is valid")
    })
}

/// Result of matching a raw string against the describe grammar.
///
/// Strings that don't fit the grammar at all are carried through as-is
/// rather than being rejected; they may still be perfectly usable version
/// literals (e.g. taken from packaged metadata).
#[derive(Debug, Clone, PartialEq)]
pub enum DescribeParts {
    /// The string is treated as an already-canonical version
    Opaque(String),
    Described {
        main: String,
        changes: u64,
        commit: Option<String>,
        dirty: bool,
        broken: bool,
    },
}

impl DescribeParts {
    pub fn parse(text: &str) -> Self {
        let caps = match describe_re().captures(text) {
            Some(caps) => caps,
            None => return DescribeParts::Opaque(text.to_string()),
        };

        let main = caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let changes = caps
            .get(2)
            .map(|m| m.as_str().trim_matches('-'))
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);
        let commit = caps.get(4).map(|m| m.as_str().to_string());

        DescribeParts::Described {
            main,
            changes,
            commit,
            // Substring checks rather than group access: the markers apply
            // no matter where git managed to place them
            dirty: text.contains("-dirty"),
            broken: text.contains("-broken"),
        }
    }
}

/// Parsed version, including git describe notation.
///
/// Immutable once constructed; every resolve builds a fresh one.
#[derive(Debug, Clone)]
pub struct Version {
    /// Given version text, trimmed
    pub text: String,
    /// Canonical version derived from 'text'
    pub canonical: String,
    /// Structured form of the canonical string
    pub version: LooseVersion,
    /// Structured form of the tag-derived main segment, when the describe
    /// grammar matched
    pub main: Option<LooseVersion>,
    /// Number of changes since the last git tag
    pub changes: u64,
    /// Abbreviated commit id from the describe string
    pub commit: Option<String>,
    /// True if local changes are present
    pub dirty: bool,
    /// True if git could not output a version
    pub broken: bool,
    /// True if the patch number was deduced from the number of changes
    pub auto_patch: bool,
}

impl Version {
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_string();

        let (main, changes, commit, dirty, broken) = match DescribeParts::parse(&text) {
            DescribeParts::Opaque(raw) => {
                let version = LooseVersion::parse(&raw);
                return Version {
                    canonical: raw.clone(),
                    text: raw,
                    version,
                    main: None,
                    changes: 0,
                    commit: None,
                    dirty: false,
                    broken: false,
                    auto_patch: false,
                };
            }
            DescribeParts::Described {
                main,
                changes,
                commit,
                dirty,
                broken,
            } => (main, changes, commit, dirty, broken),
        };

        let main = LooseVersion::parse(&main);
        let mut canonical = main.to_string();
        let mut auto_patch = false;

        if main.numeric_component_count() < 3 {
            // Auto-complete M.m.p with 'p' being number of changes since M.m
            canonical.push_str(&format!(".{}", changes));
            auto_patch = true;
        } else if changes > 0 {
            canonical.push_str(&format!("b{}", changes));
        }
        if broken {
            canonical.push_str("broken");
        }
        if dirty {
            canonical.push_str("dev");
            if let Some(commit) = &commit {
                canonical.push_str(&format!("-{}", commit));
            }
        }

        Version {
            text,
            version: LooseVersion::parse(&canonical),
            canonical,
            main: Some(main),
            changes,
            commit,
            dirty,
            broken,
            auto_patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}
