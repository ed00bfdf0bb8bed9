//! Ordered parameter output container.
//!
//! [`ParamList`] is a dumb sink: append-only, order-preserving, with no
//! deduplication and no sorting. It knows nothing about shapes or protocol
//! rules, so alternate consumers (a percent-encoding step, test inspection)
//! can treat it as a plain ordered pair sequence.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Query-component encoding set: everything except the unreserved
/// characters (`A-Z a-z 0-9 - . _ ~`) is percent-encoded.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A single emitted parameter: an immutable (name, value) string pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    name: String,
    value: String,
}

impl Param {
    /// Create a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The dotted parameter name (e.g. `Filters.1.Name`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The string value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={}",
            utf8_percent_encode(&self.name, QUERY_ENCODE_SET),
            utf8_percent_encode(&self.value, QUERY_ENCODE_SET)
        )
    }
}

/// The ordered sequence of parameters produced by one traversal call.
///
/// Iteration yields entries in insertion order. The list is created fresh per
/// [`to_query_params`](crate::to_query_params) invocation and owned by the
/// caller thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Append one parameter. Never fails, never deduplicates.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push(Param::new(name, value));
    }

    /// Number of parameters in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters have been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Iterate over `(name, value)` string pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|p| (p.name(), p.value()))
    }

    /// Render the list as a percent-encoded query string
    /// (`name=value` pairs joined with `&`).
    ///
    /// # Example
    ///
    /// ```
    /// use dotquery::ParamList;
    ///
    /// let mut params = ParamList::new();
    /// params.add("Action", "DescribeInstances");
    /// params.add("Filter.1.Name", "tag:env");
    /// assert_eq!(
    ///     params.to_query_string(),
    ///     "Action=DescribeInstances&Filter.1.Name=tag%3Aenv"
    /// );
    /// ```
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for param in &self.params {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&param.to_string());
        }
        out
    }
}

impl IntoIterator for ParamList {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
