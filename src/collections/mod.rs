//! Collection utilities and data structures

/// The ordered key-value [`Collection`] type, storage and access.
pub mod collection;
mod control;
/// JSON encoding options and serde support.
pub mod json;
mod query;
#[cfg(feature = "random")]
mod random;
/// Pure transformations and the key sort modes they use.
pub mod transform;

pub use crate::key::Key;
pub use collection::Collection;
pub use json::JsonOptions;
pub use transform::SortMode;
