//! The shape model: a polymorphic description of a value's wire type.
//!
//! A [`Shape`] describes how one node of a value tree serializes: as a
//! structure of named members, a list, a map, a timestamp, a blob, or a
//! residual scalar. Each shape may carry a serialization-name override
//! (`serialized_name`) used in place of the logical member/key/value name,
//! and list/map shapes may be marked *flattened*, which omits the extra
//! `member`/`entry` path segment.
//!
//! Shapes are plain immutable data; sharing one shape tree across threads
//! and calls is safe.

use std::str::FromStr;

use crate::error::Error;

/// Recognized timestamp serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimestampFormat {
    /// ISO-8601 extended representation (`1970-01-01T00:01:40Z`). The default.
    #[default]
    Iso8601,
    /// RFC-822 date representation (`Thu, 01 Jan 1970 00:01:40 -0000`).
    Rfc822,
    /// Integer seconds since the Unix epoch, as a decimal string.
    UnixTimestamp,
}

impl TimestampFormat {
    /// The wire-level metadata tag for this format.
    #[must_use]
    pub const fn as_tag(&self) -> &'static str {
        match self {
            Self::Iso8601 => "iso8601",
            Self::Rfc822 => "rfc822",
            Self::UnixTimestamp => "unixtimestamp",
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "iso8601" => Ok(Self::Iso8601),
            "rfc822" => Ok(Self::Rfc822),
            "unixtimestamp" => Ok(Self::UnixTimestamp),
            other => Err(Error::unsupported_timestamp_format(other)),
        }
    }
}

impl std::fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// The kind of a [`Shape`]: one closed variant per wire type.
///
/// Traversal dispatches with an exhaustive match over this enum, so adding a
/// kind forces every dispatch site to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    /// Named members in declaration order.
    Structure {
        /// `(logical name, member shape)` pairs, ordered.
        members: Vec<(String, Shape)>,
    },
    /// Ordered sequence of one element shape.
    List {
        /// The shape of every element.
        element: Box<Shape>,
        /// Omit the `member` path segment when set.
        flattened: bool,
    },
    /// Ordered key/value pairs.
    Map {
        /// The shape of every key.
        key: Box<Shape>,
        /// The shape of every value.
        value: Box<Shape>,
        /// Omit the `entry` path segment when set.
        flattened: bool,
    },
    /// A UTC date-time.
    Timestamp {
        /// Raw format metadata tag as supplied by the schema; `None` means
        /// the default (`iso8601`). Parsed at emission time, so an
        /// unrecognized tag aborts the call rather than being silently
        /// ignored.
        format: Option<String>,
    },
    /// A raw byte sequence, emitted as standard base64.
    Blob,
    /// Residual scalar (string, number, boolean): the value's natural string
    /// form is emitted unmodified.
    Scalar,
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    serialized_name: Option<String>,
    kind: ShapeKind,
}

impl Shape {
    /// Create a structure shape from `(name, shape)` member pairs.
    ///
    /// Member order is preserved but does not affect emission order, which
    /// follows the input *value*'s insertion order.
    #[must_use]
    pub fn structure<N, I>(members: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Shape)>,
    {
        Self {
            serialized_name: None,
            kind: ShapeKind::Structure {
                members: members
                    .into_iter()
                    .map(|(name, shape)| (name.into(), shape))
                    .collect(),
            },
        }
    }

    /// Create a list shape with the given element shape.
    #[must_use]
    pub fn list(element: Shape) -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::List {
                element: Box::new(element),
                flattened: false,
            },
        }
    }

    /// Create a map shape with the given key and value shapes.
    #[must_use]
    pub fn map(key: Shape, value: Shape) -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::Map {
                key: Box::new(key),
                value: Box::new(value),
                flattened: false,
            },
        }
    }

    /// Create a timestamp shape with the default (`iso8601`) format.
    #[must_use]
    pub const fn timestamp() -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::Timestamp { format: None },
        }
    }

    /// Create a timestamp shape with an explicit format.
    #[must_use]
    pub fn timestamp_format(format: TimestampFormat) -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::Timestamp {
                format: Some(format.as_tag().to_string()),
            },
        }
    }

    /// Create a timestamp shape carrying a raw metadata tag.
    ///
    /// The tag is validated when a value is serialized, not here; an
    /// unrecognized tag surfaces as
    /// [`Error::UnsupportedTimestampFormat`](crate::Error::UnsupportedTimestampFormat)
    /// during the call.
    #[must_use]
    pub fn timestamp_tag(tag: impl Into<String>) -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::Timestamp {
                format: Some(tag.into()),
            },
        }
    }

    /// Create a blob shape.
    #[must_use]
    pub const fn blob() -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::Blob,
        }
    }

    /// Create a residual scalar shape.
    #[must_use]
    pub const fn scalar() -> Self {
        Self {
            serialized_name: None,
            kind: ShapeKind::Scalar,
        }
    }

    /// Set the wire-level name override for this shape.
    #[must_use]
    pub fn with_serialized_name(mut self, name: impl Into<String>) -> Self {
        self.serialized_name = Some(name.into());
        self
    }

    /// Mark a list or map shape as flattened (omits the `member`/`entry`
    /// path segment). Has no effect on other kinds.
    #[must_use]
    pub fn flattened(mut self) -> Self {
        match &mut self.kind {
            ShapeKind::List { flattened, .. } | ShapeKind::Map { flattened, .. } => {
                *flattened = true;
            }
            _ => {}
        }
        self
    }

    /// The serialization-name override, if set.
    #[must_use]
    pub fn serialized_name(&self) -> Option<&str> {
        self.serialized_name.as_deref()
    }

    /// The kind of this shape.
    #[must_use]
    pub const fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Look up a structure member shape by logical name.
    ///
    /// Returns `None` for unknown names and for non-structure shapes.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Shape> {
        match &self.kind {
            ShapeKind::Structure { members } => members
                .iter()
                .find(|(member_name, _)| member_name == name)
                .map(|(_, shape)| shape),
            _ => None,
        }
    }

    /// Short kind name used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match &self.kind {
            ShapeKind::Structure { .. } => "structure",
            ShapeKind::List { .. } => "list",
            ShapeKind::Map { .. } => "map",
            ShapeKind::Timestamp { .. } => "timestamp",
            ShapeKind::Blob => "blob",
            ShapeKind::Scalar => "scalar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_format_parse() {
        assert_eq!(
            "iso8601".parse::<TimestampFormat>().expect("parse"),
            TimestampFormat::Iso8601
        );
        assert_eq!(
            "rfc822".parse::<TimestampFormat>().expect("parse"),
            TimestampFormat::Rfc822
        );
        assert_eq!(
            "unixtimestamp".parse::<TimestampFormat>().expect("parse"),
            TimestampFormat::UnixTimestamp
        );
    }

    #[test]
    fn timestamp_format_parse_unrecognized() {
        let err = "rfc850".parse::<TimestampFormat>().expect_err("should fail");
        assert_eq!(err.to_string(), "unsupported timestamp format `rfc850`");
    }

    #[test]
    fn timestamp_format_round_trips_through_tag() {
        for format in [
            TimestampFormat::Iso8601,
            TimestampFormat::Rfc822,
            TimestampFormat::UnixTimestamp,
        ] {
            assert_eq!(
                format.as_tag().parse::<TimestampFormat>().expect("parse"),
                format
            );
        }
    }

    #[test]
    fn structure_member_lookup() {
        let shape = Shape::structure([("Key", Shape::scalar()), ("Value", Shape::scalar())]);

        assert!(shape.member("Key").is_some());
        assert!(shape.member("Value").is_some());
        assert!(shape.member("Color").is_none());
    }

    #[test]
    fn member_lookup_on_non_structure() {
        assert!(Shape::scalar().member("x").is_none());
        assert!(Shape::list(Shape::scalar()).member("x").is_none());
    }

    #[test]
    fn flattened_marks_list_and_map() {
        let list = Shape::list(Shape::scalar()).flattened();
        assert!(matches!(
            list.kind(),
            ShapeKind::List {
                flattened: true,
                ..
            }
        ));

        let map = Shape::map(Shape::scalar(), Shape::scalar()).flattened();
        assert!(matches!(
            map.kind(),
            ShapeKind::Map {
                flattened: true,
                ..
            }
        ));
    }

    #[test]
    fn flattened_ignored_on_scalar() {
        let scalar = Shape::scalar().flattened();
        assert_eq!(scalar.kind(), &ShapeKind::Scalar);
    }

    #[test]
    fn serialized_name_override() {
        let shape = Shape::scalar().with_serialized_name("Item");
        assert_eq!(shape.serialized_name(), Some("Item"));
        assert_eq!(Shape::scalar().serialized_name(), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Shape::structure::<&str, _>([]).kind_name(), "structure");
        assert_eq!(Shape::list(Shape::scalar()).kind_name(), "list");
        assert_eq!(Shape::map(Shape::scalar(), Shape::scalar()).kind_name(), "map");
        assert_eq!(Shape::timestamp().kind_name(), "timestamp");
        assert_eq!(Shape::blob().kind_name(), "blob");
        assert_eq!(Shape::scalar().kind_name(), "scalar");
    }
}
