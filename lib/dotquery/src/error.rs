//! Error types for dotquery.

use derive_more::{Display, Error};

/// Main error type for query parameter serialization.
///
/// Every error aborts the whole [`to_query_params`](crate::to_query_params)
/// call; there is no partial-result mode. The operation is deterministic, so
/// a failed call will fail the same way until the schema or the input value
/// is fixed.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// The shape declares a timestamp format tag outside the recognized set.
    ///
    /// This is a schema configuration defect, not a data defect.
    #[display("unsupported timestamp format `{_0}`")]
    UnsupportedTimestampFormat(#[error(not(source))] String),

    /// The input value names a field absent from the structure shape's members.
    #[display("unknown member `{name}` at '{path}'")]
    UnknownMember {
        /// The field name that could not be resolved.
        name: String,
        /// Dotted path of the enclosing structure (empty at the root).
        path: String,
    },

    /// The value's kind does not match the shape's kind at some path.
    #[display("shape mismatch at '{path}': expected {expected}, found {found}")]
    ShapeMismatch {
        /// The kind the shape requires.
        expected: &'static str,
        /// The kind actually supplied.
        found: &'static str,
        /// Dotted path where the mismatch was detected (empty at the root).
        path: String,
    },

    /// The value tree nests deeper than the traversal bound allows.
    #[display("value nesting exceeds {limit} levels at '{path}'")]
    RecursionLimit {
        /// The fixed traversal depth bound.
        limit: usize,
        /// Dotted path at which the bound was hit.
        path: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unsupported-timestamp-format error.
    #[must_use]
    pub fn unsupported_timestamp_format(tag: impl Into<String>) -> Self {
        Self::UnsupportedTimestampFormat(tag.into())
    }

    /// Create an unknown-member error.
    #[must_use]
    pub fn unknown_member(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnknownMember {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a shape-mismatch error.
    #[must_use]
    pub fn shape_mismatch(
        expected: &'static str,
        found: &'static str,
        path: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            expected,
            found,
            path: path.into(),
        }
    }

    /// Returns the dotted path at which the error was detected, if any.
    ///
    /// [`Error::UnsupportedTimestampFormat`] carries no path: the defect
    /// belongs to the schema, not to a position in the value tree.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnsupportedTimestampFormat(_) => None,
            Self::UnknownMember { path, .. }
            | Self::ShapeMismatch { path, .. }
            | Self::RecursionLimit { path, .. } => Some(path),
        }
    }

    /// Returns `true` if this error indicates a schema defect rather than a
    /// malformed input value.
    #[must_use]
    pub const fn is_schema_defect(&self) -> bool {
        matches!(self, Self::UnsupportedTimestampFormat(_))
    }
}
