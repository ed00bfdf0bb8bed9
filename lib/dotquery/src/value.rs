//! The input value tree.
//!
//! A [`Value`] is caller-supplied data conforming to a shape tree: structures
//! and maps are *ordered* pair sequences (emission follows their insertion
//! order), lists are ordered sequences, timestamps are UTC date-times, blobs
//! are raw bytes, and scalars render via their natural string form.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// One node of an input value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Ordered `(member name, value)` pairs.
    Structure(Vec<(String, Value)>),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Ordered `(key, value)` pairs.
    Map(Vec<(Value, Value)>),
    /// A UTC date-time.
    Timestamp(DateTime<Utc>),
    /// Raw bytes.
    Blob(Bytes),
    /// A string scalar.
    String(String),
    /// An integer scalar, rendered in decimal.
    Integer(i64),
    /// A floating-point scalar, rendered in decimal.
    Float(f64),
    /// A boolean scalar, rendered as `true`/`false`.
    Bool(bool),
}

impl Value {
    /// Build a structure value from `(name, value)` pairs, preserving order.
    #[must_use]
    pub fn structure<N, V, I>(members: I) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (N, V)>,
    {
        Self::Structure(
            members
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Build a list value, preserving order.
    #[must_use]
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a map value from `(key, value)` pairs, preserving order.
    #[must_use]
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Short kind name used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Structure(_) => "structure",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Timestamp(_) => "timestamp",
            Self::Blob(_) => "blob",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }

    /// The natural string form of a scalar value, or `None` for composite,
    /// timestamp, and blob values (those have format-sensitive encodings of
    /// their own).
    #[must_use]
    pub fn render_scalar(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(x) => Some(x.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Self::Blob(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Blob(Bytes::copy_from_slice(value))
    }
}

/// Convert a JSON tree into a value tree.
///
/// Objects become ordered structures (`serde_json`'s `preserve_order`
/// feature keeps insertion order); object members whose value is `null` are
/// dropped, matching the absent-member rule. A standalone `null` becomes the
/// empty string. Numbers become [`Value::Integer`] when they fit `i64`,
/// otherwise [`Value::Float`].
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::String(String::new()),
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::list(items),
            serde_json::Value::Object(members) => Self::Structure(
                members
                    .into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(name, v)| (name, Self::from(v)))
                    .collect(),
            ),
        }
    }
}
