//! Tag filtering policy.
//!
//! Classifies tags as release-like or excluded. Excluded tags are
//! signature/attestation artifacts, architecture and OS variants, raw
//! content hashes, and build timestamps; none of them are meant for
//! general consumption and mirroring them would multiply copy work for
//! no benefit.

use regex::Regex;


/// 40-hex content hash, optionally followed by `-` and an alphanumeric
/// suffix, e.g. `3d5394a7e7072bc7754e5ce071bc6661d07da3e5` or
/// `05e1a576b6726093a16e74fa31ef133f7a1ac6df-linux`.
const HASH_PATTERN: &str = r"^[a-f0-9]{40}(-[a-zA-Z0-9]+)?$";

/// Arbitrary prefix glued to a 40-hex content hash, e.g.
/// `amd64-0c1a1a690a12a50a35455ad8407c42edcf106ea0`.
const PREFIXED_HASH_PATTERN: &str = r"^.+-[a-f0-9]{40}$";

/// Build timestamp, e.g. `2020-01-13_11-17-25.346_PST`.
const TIMESTAMP_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}(\.\d{1,3})?_[A-Z]{3}$";

/// A configurable set of tag exclusion rules.
///
/// Two stock policies are provided: [`TagPolicy::curated`] applies the
/// full rule set, [`TagPolicy::signatures_only`] applies only the `.sig`
/// rule for less-curated sources where variant tags should be mirrored
/// as-is.
///
/// # Examples
///
/// ```
/// use libmirror::TagPolicy;
///
/// let policy = TagPolicy::curated();
/// let tags = vec![
///     "latest".to_string(),
///     "1.25".to_string(),
///     "1.25-windows".to_string(),
/// ];
/// assert_eq!(policy.filter(&tags), vec!["1.25", "latest"]);
/// ```
#[derive(Debug, Clone)]
pub struct TagPolicy {
    excluded_substrings: Vec<&'static str>,
    excluded_patterns: Vec<Regex>,
}

impl TagPolicy {
    /// The full exclusion rule set for curated mirror sources.
    ///
    /// Excludes signature/attestation artifacts (`.sig`, `sha256-`,
    /// `.att`), architecture and OS variants (`arm`, `arm64`, `windows`,
    /// `nanoserver`, `windowsservercore`), content-hash tags, and build
    /// timestamps.
    pub fn curated() -> Self {
        Self {
            excluded_substrings: vec![
                ".sig",
                "sha256-",
                ".att",
                "arm",
                "arm64",
                "windows",
                "nanoserver",
                "windowsservercore",
            ],
            excluded_patterns: vec![
                compile(HASH_PATTERN),
                compile(PREFIXED_HASH_PATTERN),
                compile(TIMESTAMP_PATTERN),
            ],
        }
    }

    /// The minimal rule set: only signature tags are excluded.
    pub fn signatures_only() -> Self {
        Self {
            excluded_substrings: vec![".sig"],
            excluded_patterns: Vec::new(),
        }
    }

    /// Returns `true` if `tag` matches any exclusion rule.
    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_substrings.iter().any(|s| tag.contains(s))
            || self.excluded_patterns.iter().any(|re| re.is_match(tag))
    }

    /// Returns the release-like subset of `tags`, sorted ascending.
    ///
    /// The sort makes the output deterministic regardless of the order
    /// the registry returned the tags in. Filtering only removes
    /// elements; it never introduces duplicates.
    pub fn filter(&self, tags: &[String]) -> Vec<String> {
        let mut valid: Vec<String> = tags
            .iter()
            .filter(|tag| !self.is_excluded(tag))
            .cloned()
            .collect();
        valid.sort();
        valid
    }
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self::curated()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("exclusion pattern compiles")
}
