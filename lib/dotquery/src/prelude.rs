//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use dotquery::prelude::*;
//! ```

pub use crate::{
    Builder, Error, Param, ParamList, Result, Shape, ShapeKind, TimestampFormat, Value,
    to_query_params,
};
