//! Tag set difference.

use std::collections::HashSet;


/// Returns the elements of `source` not present in `destination`.
///
/// The relative order of `source` is preserved, and duplicates in
/// `source` are kept as-is (this is a membership filter, not a dedup).
/// An empty `destination` returns `source` unchanged.
///
/// # Examples
///
/// ```
/// use libmirror::missing_tags;
///
/// let source = vec!["1.24".to_string(), "1.25".to_string(), "latest".to_string()];
/// let destination = vec!["1.24".to_string()];
/// assert_eq!(missing_tags(&source, &destination), vec!["1.25", "latest"]);
/// ```
pub fn missing_tags(source: &[String], destination: &[String]) -> Vec<String> {
    let present: HashSet<&str> = destination.iter().map(String::as_str).collect();
    source
        .iter()
        .filter(|tag| !present.contains(tag.as_str()))
        .cloned()
        .collect()
}
