//! Image reference handling.
//!
//! A [`Reference`] names a repository within a registry, e.g.
//! `registry.example.com/org/name`. References are kept as opaque
//! slash-delimited strings: the only structure the synchronizer relies on
//! is the position of slashes, which the name-mapping rules inspect.

use crate::error::{MirrorError, Result};
use std::fmt;
use std::str::FromStr;


/// An opaque, slash-delimited image reference without a tag.
///
/// Parsing enforces the one structural requirement the synchronizer has:
/// a reference must contain at least one `/` so that the name-mapping
/// rules always have a first and last slash to work from. A reference
/// without a slash (a bare name like `nginx`) is rejected up front.
///
/// # Examples
///
/// ```
/// use libmirror::Reference;
///
/// let reference: Reference = "docker.io/library/nginx".parse().unwrap();
/// assert_eq!(reference.as_str(), "docker.io/library/nginx");
/// assert_eq!(reference.tagged("1.25"), "docker.io/library/nginx:1.25");
///
/// assert!("nginx".parse::<Reference>().is_err());
/// assert!("".parse::<Reference>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl FromStr for Reference {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MirrorError::validation("reference must not be empty"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(MirrorError::validation(format!(
                "reference must not contain whitespace: {:?}",
                trimmed
            )));
        }
        if !trimmed.contains('/') {
            return Err(MirrorError::validation(format!(
                "reference must contain at least one '/': {:?}",
                trimmed
            )));
        }
        Ok(Reference(trimmed.to_string()))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Reference {
    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the reference with a tag appended, e.g. `registry/repo:1.0`.
    pub fn tagged(&self, tag: &str) -> String {
        format!("{}:{}", self.0, tag)
    }
}
