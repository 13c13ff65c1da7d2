//! Tabular datasets for Wissensrunde.
//!
//! A [`Dataset`] is an ordered list of [`Row`]s, each a map from field name
//! to [`Value`]. The games crate only ever reads from a dataset; loading and
//! ownership stay with the host. Datasets can be built programmatically or
//! deserialized from a JSON array of objects.

/// Dataset and row containers.
pub mod dataset;
/// Error types used throughout the crate.
pub mod error;
/// Query builder for filtering rows.
pub mod query;
/// Field values.
pub mod value;

/// Re-export dataset types.
pub use dataset::{Dataset, Row};
/// Re-export error types.
pub use error::{DataError, DataResult};
/// Re-export the row query builder.
pub use query::RowQuery;
/// Re-export the value type.
pub use value::Value;
