//! Macros for initializing [`Collection`](crate::Collection)s.
//!
//! Keyed forms take `key => value` pairs, list forms take bare values and
//! number them from zero. The `json_*` variants pass every value through
//! [`serde_json::json!`], so each value must be a single token tree:
//! wrap negative numbers and other compound expressions in parentheses.

/// Macro for creating a [`Collection`](crate::Collection) with inferred value type.
///
/// # Example
///
/// ```rust
/// use sugars_collection::macros::collection::collection;
///
/// let list = collection![10, 20, 30];
/// assert_eq!(list.get(2), Some(&30));
///
/// let keyed = collection! {
///     "name" => "ada",
///     7 => "seven",
/// };
/// assert_eq!(keyed.get("name"), Some(&"ada"));
/// assert_eq!(keyed.get(7), Some(&"seven"));
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! __sugars_collection {
    () => {
        $crate::Collection::new()
    };
    ($($k: expr => $v: expr),+ $(,)?) => {
        $crate::Collection::make([$(($crate::Key::from($k), $v),)+])
    };
    ($($v: expr),+ $(,)?) => {
        $crate::Collection::from_values([$($v,)+])
    };
}

/// Macro for creating a JSON-valued [`Collection`](crate::Collection).
///
/// # Example
///
/// ```rust
/// use sugars_collection::macros::collection::json_collection;
/// use serde_json::json;
///
/// let people = json_collection![
///     {"name": "ada", "age": 36},
///     {"name": "grace", "age": 85},
/// ];
/// assert_eq!(people[1]["age"], json!(85));
///
/// let config = json_collection! {
///     "debug" => true,
///     "hosts" => ["a.example", "b.example"],
/// };
/// assert_eq!(config["hosts"][0], json!("a.example"));
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! __sugars_json_collection {
    () => {
        $crate::Collection::<$crate::__private::Value>::new()
    };
    // List arm first: a brace-delimited value must not be parsed as a key expression.
    ($($v: tt),+ $(,)?) => {
        $crate::Collection::<$crate::__private::Value>::from_values(
            [$($crate::__private::json!($v),)+]
        )
    };
    ($($k: expr => $v: tt),+ $(,)?) => {
        $crate::Collection::<$crate::__private::Value>::make(
            [$(($crate::Key::from($k), $crate::__private::json!($v)),)+]
        )
    };
}

#[doc(inline)]
pub use __sugars_collection as collection;

#[doc(inline)]
pub use __sugars_json_collection as json_collection;
