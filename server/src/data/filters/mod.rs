//! Filtered-list query builder
//!
//! Comma-separated query values become OR-groups; groups from different
//! fields are combined with AND. Columns only ever come from the static
//! whitelists in [`columns`].
//!
//! ## Usage
//!
//! ```
//! use belaymatch_server::data::filters::{PredicateBuilder, SqlParams, columns};
//!
//! let predicate = PredicateBuilder::new()
//!     .field(&columns::CLIMBER_LOCATION, Some("NYC, , Boulder"))
//!     .build();
//! let mut params = SqlParams::default();
//! let sql = predicate.to_sql(&mut params);
//! assert_eq!(
//!     sql,
//!     "(c.location_folded LIKE ? ESCAPE '\\' OR c.location_folded LIKE ? ESCAPE '\\')"
//! );
//! assert_eq!(params.values.len(), 2);
//! ```

mod builder;
mod types;

pub use builder::{PredicateBuilder, columns, split_values};
pub use types::{
    Condition, FieldKind, FilterField, OrGroup, Predicate, SqlParams, SqlValue,
};
