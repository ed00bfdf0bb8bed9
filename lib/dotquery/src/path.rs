//! Dotted parameter path construction.
//!
//! Paths follow the grammar `segment ("." segment)*` where a segment is a
//! member/key/value name, the literal `member` or `entry`, or a decimal
//! 1-based index (e.g. `Filters.1.Values.member.2`). Keeping the segment
//! rules in one place makes the flattening and indexing behavior testable
//! independently of the traversal recursion.

/// Join an ordered list of segments into a dotted path string.
///
/// # Example
///
/// ```
/// use dotquery::path::join;
///
/// let path = join(["Tags", "entry", "1", "key"]);
/// assert_eq!(path, "Tags.entry.1.key");
/// ```
pub fn join<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for segment in segments {
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(segment);
    }
    out
}

/// A dotted parameter path, built incrementally during traversal.
///
/// The root path is the empty string; appending to the root yields the bare
/// segment with no leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(String);

impl Path {
    /// The empty root path.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns `true` if this is the root (empty) path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a name segment, producing a new path.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(segment.to_string())
        } else {
            Self(join([self.0.as_str(), segment]))
        }
    }

    /// Append a decimal 1-based index segment, producing a new path.
    #[must_use]
    pub fn indexed(&self, n: usize) -> Self {
        self.child(&n.to_string())
    }

    /// Replace the last segment with `name`, producing a new path.
    ///
    /// This is the flattened-list rename rule: the substitution applies to
    /// the enclosing structure's own appended segment, not an extra nesting
    /// level. Renaming the root yields a path of just `name`.
    #[must_use]
    pub fn rename_last(&self, name: &str) -> Self {
        let mut segments: Vec<&str> = self.0.split('.').collect();
        segments.pop();
        segments.push(name);
        Self(join(segments))
    }

    /// Get the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the path, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_segments() {
        assert_eq!(join(["Filters", "1", "Name"]), "Filters.1.Name");
        assert_eq!(join(["Timeout"]), "Timeout");
        assert_eq!(join([] as [&str; 0]), "");
    }

    #[test]
    fn child_from_root_has_no_leading_dot() {
        let path = Path::root().child("Ids");
        assert_eq!(path.as_str(), "Ids");
        assert!(!path.is_root());
    }

    #[test]
    fn child_appends_with_dot() {
        let path = Path::root().child("Tags").child("entry");
        assert_eq!(path.as_str(), "Tags.entry");
    }

    #[test]
    fn indexed_is_one_based_decimal() {
        let path = Path::root().child("Ids").child("member").indexed(2);
        assert_eq!(path.as_str(), "Ids.member.2");
    }

    #[test]
    fn rename_last_replaces_final_segment() {
        let path = Path::root().child("Filters").child("Values");
        assert_eq!(path.rename_last("Item").as_str(), "Filters.Item");
    }

    #[test]
    fn rename_last_on_single_segment() {
        let path = Path::root().child("Values");
        assert_eq!(path.rename_last("Item").as_str(), "Item");
    }

    #[test]
    fn display_and_as_ref() {
        let path = Path::from("Tags.entry.1.key");
        assert_eq!(path.to_string(), "Tags.entry.1.key");
        let s: &str = path.as_ref();
        assert_eq!(s, "Tags.entry.1.key");
    }
}
