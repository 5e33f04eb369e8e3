use std::cmp::Ordering;
use std::fmt;

/// One component of a loose version: a run of digits or a run of letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Num(u64),
    Alpha(String),
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Component::Num(a), Component::Num(b)) => a.cmp(b),
            (Component::Alpha(a), Component::Alpha(b)) => a.cmp(b),
            // Numeric components sort before alphabetic ones
            (Component::Num(_), Component::Alpha(_)) => Ordering::Less,
            (Component::Alpha(_), Component::Num(_)) => Ordering::Greater,
        }
    }
}

/// Order-comparable version with dot-separated numeric/alpha segments.
///
/// Accepts anything: `"1.2.3"`, `"1.2.3b5"`, `"1.4.7dev-dead"` all parse.
/// Digit runs become numeric components, letter runs become string
/// components, dots and dashes separate. Display returns the original
/// string unchanged.
#[derive(Debug, Clone, Eq)]
pub struct LooseVersion {
    text: String,
    components: Vec<Component>,
}

impl LooseVersion {
    pub fn parse(text: &str) -> Self {
        let mut components = Vec::new();
        let mut digits = String::new();
        let mut alphas = String::new();

        for ch in text.chars() {
            if ch.is_ascii_digit() {
                if !alphas.is_empty() {
                    components.push(Component::Alpha(std::mem::take(&mut alphas)));
                }
                digits.push(ch);
            } else if ch.is_alphabetic() {
                if !digits.is_empty() {
                    components.push(flush_digits(&mut digits));
                }
                alphas.push(ch);
            } else {
                if !digits.is_empty() {
                    components.push(flush_digits(&mut digits));
                }
                if !alphas.is_empty() {
                    components.push(Component::Alpha(std::mem::take(&mut alphas)));
                }
            }
        }
        if !digits.is_empty() {
            components.push(flush_digits(&mut digits));
        }
        if !alphas.is_empty() {
            components.push(Component::Alpha(alphas));
        }

        LooseVersion {
            text: text.to_string(),
            components,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of numeric components in the version
    pub fn numeric_component_count(&self) -> usize {
        self.components
            .iter()
            .filter(|c| matches!(c, Component::Num(_)))
            .count()
    }

    /// The first three numeric components, or None if fewer than three exist.
    /// Components beyond the third are ignored.
    pub fn release_triple(&self) -> Option<(u64, u64, u64)> {
        let mut nums = self.components.iter().filter_map(|c| match c {
            Component::Num(n) => Some(*n),
            Component::Alpha(_) => None,
        });
        Some((nums.next()?, nums.next()?, nums.next()?))
    }
}

fn flush_digits(digits: &mut String) -> Component {
    // Overlong digit runs saturate
    let n = digits.parse::<u64>().unwrap_or(u64::MAX);
    digits.clear();
    Component::Num(n)
}

impl fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}
