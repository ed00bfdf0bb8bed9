//! Shape-driven serialization of typed values into dotted/indexed query
//! parameters, the legacy "query" wire style used by certain web-service RPC
//! protocols where complex parameters are expressed as flat form fields
//! (`Filter.1.Name=...&Filter.1.Value.1=...`) rather than nested documents.
//!
//! The crate provides:
//! - [`Shape`] - polymorphic wire-type description (structure, list, map,
//!   timestamp, blob, scalar) with serialized-name and flattening metadata
//! - [`Value`] - the caller-supplied ordered value tree
//! - [`Builder`] and [`to_query_params`] - the recursive traversal
//! - [`Param`] and [`ParamList`] - the ordered output pairs
//! - [`Error`] and [`Result`] - error handling
//! - [`path`] - dotted-path segment rules
//!
//! # Example
//!
//! ```
//! use dotquery::{Shape, Value, to_query_params};
//!
//! let rules = Shape::structure([(
//!     "Tags",
//!     Shape::map(Shape::scalar(), Shape::scalar()),
//! )]);
//! let value = Value::structure([("Tags", Value::map([("env", "prod")]))]);
//!
//! let params = to_query_params(&rules, &value)?;
//! assert_eq!(params.to_query_string(), "Tags.entry.1.key=env&Tags.entry.1.value=prod");
//! # Ok::<(), dotquery::Error>(())
//! ```

mod builder;
mod error;
mod params;
pub mod path;
pub mod prelude;
mod shape;
mod value;

pub use builder::{Builder, to_query_params};
pub use error::{Error, Result};
pub use params::{Param, ParamList};
pub use path::Path;
pub use shape::{Shape, ShapeKind, TimestampFormat};
pub use value::Value;
