//! Field path resolution against a control tree.

use std::fmt;

use tracing::trace;

use crate::control::{ControlKind, ControlTree};

/// Actual keys leading from the root of a tree to a leaf control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlPath(Vec<String>);

impl ControlPath {
    /// Creates a path from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the key of the leaf.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    fn prepend(mut self, key: &str) -> Self {
        self.0.insert(0, key.to_string());
        self
    }
}

impl fmt::Display for ControlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Finds the first key at this level equal to `wanted` ignoring case.
fn find_key<'a, T: ControlTree + ?Sized>(tree: &'a T, wanted: &str) -> Option<&'a str> {
    let wanted = wanted.to_lowercase();
    tree.keys().into_iter().find(|key| key.to_lowercase() == wanted)
}

/// Resolves a field path to a leaf control.
///
/// Matching is case-insensitive and walks nested groups one segment at a
/// time. When a level has no match, its `fallback_key` leaf is used instead,
/// so the innermost fallback wins. A segment that names a leaf where a group
/// is needed counts as no match at that level.
///
/// # Example
///
/// ```
/// use oxide_remote_forms::{resolve_path, FormGroup};
///
/// let form = FormGroup::new()
///     .control("")
///     .group("Address", FormGroup::new().control("City"));
///
/// let path = resolve_path(&form, "address.city", '.', "").unwrap();
/// assert_eq!(path.to_string(), "Address.City");
///
/// let path = resolve_path(&form, "phone", '.', "").unwrap();
/// assert_eq!(path.leaf(), Some(""));
/// ```
pub fn resolve_path<T: ControlTree + ?Sized>(
    tree: &T,
    field_path: &str,
    separator: char,
    fallback_key: &str,
) -> Option<ControlPath> {
    let found = match field_path.split_once(separator) {
        None => find_key(tree, field_path).and_then(|key| match tree.kind(key)? {
            ControlKind::Leaf => Some(ControlPath::new([key])),
            ControlKind::Group(_) => None,
        }),
        Some((base, sub_path)) => find_key(tree, base).and_then(|key| match tree.kind(key)? {
            ControlKind::Group(group) => {
                resolve_path(group, sub_path, separator, fallback_key)
                    .map(|path| path.prepend(key))
            }
            ControlKind::Leaf => None,
        }),
    };

    if found.is_some() {
        return found;
    }

    trace!(field_path, fallback_key, "no control matched, trying fallback");
    match tree.kind(fallback_key) {
        Some(ControlKind::Leaf) => Some(ControlPath::new([fallback_key])),
        _ => None,
    }
}
