//! # Sugars Collection
//!
//! Syntactic sugar for ordered key-value data: a fluent, chainable [`Collection`].
//!
//! A `Collection` is an ordered mapping from [`Key`]s (integers or strings) to
//! values, with eager operations for mapping, filtering, grouping, sorting,
//! slicing and aggregating. Values default to [`serde_json::Value`], so
//! collections of JSON records work out of the box.
//!
//! ## Features
//!
//! - `collections` - The `Collection` type and its operations
//! - `macros` - `collection!` and `json_collection!` literals
//! - `random` - `random`, `random_one` and `shuffle` backed by [`rand`]
//!
//! ## Example
//!
//! ```rust
//! use sugars_collection::{Collection, Operator};
//! use serde_json::json;
//!
//! let people = Collection::from_values(vec![
//!     json!({"name": "ada", "age": 36, "team": "core"}),
//!     json!({"name": "grace", "age": 85, "team": "infra"}),
//!     json!({"name": "linus", "age": 12, "team": "core"}),
//! ]);
//!
//! let adults = people.where_op("age", Operator::Ge, &json!(18));
//! assert_eq!(adults.pluck("name").to_vec(), vec![json!("ada"), json!("grace")]);
//!
//! let teams = people.group_by("team");
//! assert_eq!(teams["core"].len(), 2);
//! assert_eq!(people.take(1).to_string(), r#"[{"name":"ada","age":36,"team":"core"}]"#);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod error;
pub mod key;
pub mod value;

// Conditionally compile modules based on features
#[cfg(feature = "collections")]
pub mod collections;

#[cfg(feature = "macros")]
pub mod macros;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::{json, Value};
}

pub use error::{CollectionError, Result};
pub use key::Key;
pub use value::{AsKey, Comparison, LooseEq, Operator, Record, ToNumber, ToText, Truthy};

// Re-export the collection type and its options
#[cfg(feature = "collections")]
pub use collections::{Collection, JsonOptions, SortMode};
