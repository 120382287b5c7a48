//! Destination name mapping.
//!
//! Derives the destination repository name for a source reference from a
//! destination hub prefix. Only the positions of the first and last slash
//! in the source reference are inspected; deeper structure is flattened.
//!
//! The three rules, checked in order:
//!
//! 1. **Official image**: a `/library` middle segment (Docker-Hub-style
//!    official images) keeps just the base name under the hub.
//! 2. **Collapsed namespace**: if the segment between the first and last
//!    slash is textually identical to the segment after the last slash
//!    (case-insensitive), only the last path component is kept. This is a
//!    narrow heuristic for registries with repeated path components and is
//!    deliberately not generalized further.
//! 3. **Default**: everything after the first slash is flattened into one
//!    hub-relative name with `/` replaced by `-`.

use crate::error::{MirrorError, Result};
use crate::reference::Reference;

#[cfg(test)]
mod tests;

/// Maps a source reference to its destination reference under `hub`.
///
/// `hub` is the destination registry/namespace prefix, e.g.
/// `registry.example.com/mirror`. A trailing slash on the hub is ignored;
/// an empty hub is a validation error.
///
/// # Examples
///
/// ```
/// use libmirror::{Reference, map_destination};
///
/// let source: Reference = "docker.io/library/nginx".parse().unwrap();
/// let dest = map_destination(&source, "hub.example/mirror").unwrap();
/// assert_eq!(dest.as_str(), "hub.example/mirror/nginx");
///
/// let source: Reference = "registry.example.com/org/image".parse().unwrap();
/// let dest = map_destination(&source, "hub.example/mirror").unwrap();
/// assert_eq!(dest.as_str(), "hub.example/mirror/org-image");
/// ```
pub fn map_destination(source: &Reference, hub: &str) -> Result<Reference> {
    let hub = hub.trim().trim_end_matches('/');
    if hub.is_empty() {
        return Err(MirrorError::validation("destination hub must not be empty"));
    }

    let repo = source.as_str();
    // Reference parsing guarantees at least one slash.
    let first = repo.find('/').ok_or_else(|| {
        MirrorError::validation(format!("reference has no '/': {:?}", repo))
    })?;
    let last = repo.rfind('/').unwrap_or(first);

    // Both segments keep their leading slash, so they compare like-for-like.
    let middle = &repo[first..last];
    let tail = &repo[last..];

    if middle.eq_ignore_ascii_case("/library") {
        return format!("{}/{}", hub, &tail[1..]).parse();
    }

    if middle.eq_ignore_ascii_case(tail) {
        let name = repo[last + 1..].replace('/', "-");
        return format!("{}/{}", hub, name).parse();
    }

    let flattened = repo[first + 1..].replace('/', "-");
    format!("{}/{}", hub, flattened).parse()
}
