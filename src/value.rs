//! Value semantics used by collection operations.
//!
//! Collections are generic over their values, but several operations need
//! to know more about a value than `Clone` gives them:
//!
//! - [`Truthy`] decides what `filter_truthy` drops and what `when` runs on
//! - [`LooseEq`] is the coercing comparison behind `contains`, `unique`, `sort`
//!   and the non-strict `where_op` operators
//! - [`Record`] is field access for `group_by`, `index_by`, `pluck` and `where_op`
//! - [`AsKey`] turns a field value into a bucket [`Key`]
//! - [`ToText`] and [`ToNumber`] back `implode` and the numeric aggregates
//!
//! All of them are implemented for [`serde_json::Value`], the default value
//! type, and for the common scalar types.

use crate::error::{CollectionError, Result};
use crate::key::Key;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

/// Boolean interpretation of a value.
pub trait Truthy {
    /// Returns `false` for null-like, zero, empty and `false` values.
    fn is_truthy(&self) -> bool;
}

/// Coercing comparison between two values of the same type.
pub trait LooseEq {
    /// Orders two values after coercion, `None` when they are uncomparable.
    fn loose_cmp(&self, other: &Self) -> Option<Ordering>;

    /// Equality after coercion.
    #[inline]
    fn loose_eq(&self, other: &Self) -> bool {
        self.loose_cmp(other) == Some(Ordering::Equal)
    }

    /// Total order used by `sort`, `sort_desc` and `sort_keys`.
    ///
    /// Coercing comparison is not transitive (`"9" < "10"` numerically,
    /// `"10" < "5x"` and `"5x" < "9"` as text), so sorting ranks values by
    /// class first: null and booleans, numbers and numeric strings, other
    /// strings, then containers. Inside a class scalars compare as
    /// [`LooseEq::loose_cmp`] does.
    ///
    /// The default is only correct for types whose `loose_cmp` is already a
    /// total order.
    #[inline]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.loose_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Uniform "get field by name" access on an item.
pub trait Record {
    /// Type of the field values.
    type Field;

    /// Returns the field called `name`, if the item has one.
    fn field(&self, name: &str) -> Option<&Self::Field>;
}

/// Coercion of a value into a collection key.
pub trait AsKey {
    /// Returns `None` for values that cannot be used as keys.
    fn to_key(&self) -> Option<Key>;

    /// Key for the value as it is, without coercion: only integers and
    /// strings qualify. Used by `flip`.
    #[inline]
    fn to_exact_key(&self) -> Option<Key> {
        self.to_key()
    }
}

/// Coercion of a value into text.
pub trait ToText {
    /// Returns `None` for values without a text form.
    fn to_text(&self) -> Option<Cow<'_, str>>;
}

/// Coercion of a value into a number.
pub trait ToNumber {
    /// Returns `None` for values without a numeric form.
    fn to_number(&self) -> Option<f64>;
}

/// How two values are compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// Equal after type coercion, see [`LooseEq`]
    #[default]
    Loose,
    /// Same type and same value, see [`PartialEq`]
    Strict,
}

impl Comparison {
    /// Compares `a` and `b` with this strategy.
    #[inline]
    pub fn matches<V: LooseEq + PartialEq>(self, a: &V, b: &V) -> bool {
        match self {
            Comparison::Loose => a.loose_eq(b),
            Comparison::Strict => a == b,
        }
    }
}

/// Comparison operator accepted by `where_op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=` or `==`
    Eq,
    /// `!=` or `<>`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `===`
    Identical,
    /// `!==`
    NotIdentical,
}

impl Operator {
    /// Evaluates `left <op> right`.
    pub fn apply<V: LooseEq + PartialEq>(self, left: &V, right: &V) -> bool {
        let ord = || left.loose_cmp(right);
        match self {
            Operator::Eq => left.loose_eq(right),
            Operator::Ne => !left.loose_eq(right),
            Operator::Lt => ord() == Some(Ordering::Less),
            Operator::Gt => ord() == Some(Ordering::Greater),
            Operator::Le => matches!(ord(), Some(Ordering::Less | Ordering::Equal)),
            Operator::Ge => matches!(ord(), Some(Ordering::Greater | Ordering::Equal)),
            Operator::Identical => left == right,
            Operator::NotIdentical => left != right,
        }
    }
}

impl FromStr for Operator {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "=" | "==" => Operator::Eq,
            "!=" | "<>" => Operator::Ne,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            "===" => Operator::Identical,
            "!==" => Operator::NotIdentical,
            other => return Err(CollectionError::UnknownOperator(other.to_owned())),
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Identical => "===",
            Operator::NotIdentical => "!==",
        })
    }
}

/// Parses a numeric string, allowing surrounding whitespace.
fn numeric(s: &str) -> Option<f64> {
    let t = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let plain = !t.is_empty()
        && t.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plain {
        return None;
    }
    t.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[inline]
fn number(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn compare_str(a: &str, b: &str) -> Option<Ordering> {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => Some(a.cmp(b)),
    }
}

fn compare_number_str(n: &Number, s: &str) -> Option<Ordering> {
    match numeric(s) {
        Some(y) => number(n).partial_cmp(&y),
        None => Some(n.to_string().as_str().cmp(s)),
    }
}

fn compare_lists(a: &[Value], b: &[Value]) -> Option<Ordering> {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        unequal => return Some(unequal),
    }
    for (x, y) in a.iter().zip(b) {
        match compare(x, y)? {
            Ordering::Equal => {}
            unequal => return Some(unequal),
        }
    }
    Some(Ordering::Equal)
}

fn compare_maps(a: &Map<String, Value>, b: &Map<String, Value>) -> Option<Ordering> {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        unequal => return Some(unequal),
    }
    for (k, x) in a {
        match compare(x, b.get(k)?)? {
            Ordering::Equal => {}
            unequal => return Some(unequal),
        }
    }
    Some(Ordering::Equal)
}

/// Coercing comparison of two JSON values.
///
/// Null against a string compares as the empty string. Otherwise null and
/// booleans compare both sides as booleans. Numbers and numeric strings
/// compare numerically, other strings lexically. Arrays and objects compare
/// by size first, then element-wise, and are greater than any scalar.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, Value::String(s)) => Some("".cmp(s.as_str())),
        (Value::String(s), Value::Null) => Some(s.as_str().cmp("")),
        (Value::Null | Value::Bool(_), _) | (_, Value::Null | Value::Bool(_)) => {
            Some(a.is_truthy().cmp(&b.is_truthy()))
        }
        (Value::Number(x), Value::Number(y)) => number(x).partial_cmp(&number(y)),
        (Value::Number(x), Value::String(s)) => compare_number_str(x, s),
        (Value::String(s), Value::Number(y)) => compare_number_str(y, s).map(Ordering::reverse),
        (Value::String(x), Value::String(y)) => compare_str(x, y),
        (Value::Array(x), Value::Array(y)) => compare_lists(x, y),
        (Value::Object(x), Value::Object(y)) => compare_maps(x, y),
        (Value::Array(x), Value::Object(y)) => match x.len().cmp(&y.len()) {
            Ordering::Equal => None,
            unequal => Some(unequal),
        },
        (Value::Object(x), Value::Array(y)) => match x.len().cmp(&y.len()) {
            Ordering::Equal => None,
            unequal => Some(unequal),
        },
        (Value::Array(_) | Value::Object(_), _) => Some(Ordering::Greater),
        (_, Value::Array(_) | Value::Object(_)) => Some(Ordering::Less),
    }
}

/// Numeric strings first (by value, then text), then other strings by text.
fn sort_text(a: &str, b: &str) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort class of a JSON value and its numeric form, if any.
fn sort_class(v: &Value) -> (u8, f64) {
    match v {
        Value::Null => (0, 0.0),
        Value::Bool(b) => (0, f64::from(u8::from(*b))),
        Value::Number(n) => (1, number(n)),
        Value::String(s) => match numeric(s) {
            Some(n) => (1, n),
            None => (2, 0.0),
        },
        Value::Array(_) => (3, 0.0),
        Value::Object(_) => (4, 0.0),
    }
}

/// Total order over JSON values: null and booleans, numbers and numeric
/// strings, other strings, arrays, objects.
fn sort_compare(a: &Value, b: &Value) -> Ordering {
    let (class_a, num_a) = sort_class(a);
    let (class_b, num_b) = sort_class(b);
    class_a.cmp(&class_b).then_with(|| match (a, b) {
        (Value::String(x), Value::String(y)) if class_a == 2 => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y)
                .map(|(x, y)| sort_compare(x, y))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y)
                .map(|((kx, vx), (ky, vy))| kx.cmp(ky).then_with(|| sort_compare(vx, vy)))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        _ => num_a.total_cmp(&num_b),
    })
}

// serde_json::Value
impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => number(n) != 0.0,
            Value::String(s) => s.is_truthy(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}

impl LooseEq for Value {
    #[inline]
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        compare(self, other)
    }

    #[inline]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        sort_compare(self, other)
    }
}

impl Record for Value {
    type Field = Value;

    fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(name),
            Value::Array(list) => name.parse::<usize>().ok().and_then(|i| list.get(i)),
            _ => None,
        }
    }
}

impl AsKey for Value {
    fn to_key(&self) -> Option<Key> {
        match self {
            Value::Null => Some(Key::Str(String::new())),
            Value::Bool(b) => Some(Key::from(*b)),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .map(Key::Int),
            Value::String(s) => Some(Key::from(s.as_str())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn to_exact_key(&self) -> Option<Key> {
        match self {
            Value::Number(n) => n
                .as_i64()
                .map(Key::Int)
                .or_else(|| n.as_u64().map(Key::from)),
            Value::String(s) => Some(Key::from(s.as_str())),
            _ => None,
        }
    }
}

impl ToText for Value {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => Some(Cow::Borrowed("")),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "1" } else { "" })),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl ToNumber for Value {
    fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            Value::Number(n) => n.as_f64(),
            Value::String(s) => numeric(s),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

// Strings
impl Truthy for str {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty() && self != "0"
    }
}

impl Truthy for String {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_str().is_truthy()
    }
}

impl Truthy for &str {
    #[inline]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl LooseEq for String {
    #[inline]
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        compare_str(self, other)
    }

    #[inline]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        sort_text(self, other)
    }
}

impl LooseEq for &str {
    #[inline]
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        compare_str(self, other)
    }

    #[inline]
    fn sort_cmp(&self, other: &Self) -> Ordering {
        sort_text(self, other)
    }
}

impl AsKey for String {
    #[inline]
    fn to_key(&self) -> Option<Key> {
        Some(Key::from(self.as_str()))
    }
}

impl AsKey for &str {
    #[inline]
    fn to_key(&self) -> Option<Key> {
        Some(Key::from(*self))
    }
}

impl ToText for String {
    #[inline]
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ToText for &str {
    #[inline]
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ToNumber for String {
    #[inline]
    fn to_number(&self) -> Option<f64> {
        numeric(self)
    }
}

impl ToNumber for &str {
    #[inline]
    fn to_number(&self) -> Option<f64> {
        numeric(self)
    }
}

// Booleans
impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl LooseEq for bool {
    #[inline]
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsKey for bool {
    #[inline]
    fn to_key(&self) -> Option<Key> {
        Some(Key::from(*self))
    }

    #[inline]
    fn to_exact_key(&self) -> Option<Key> {
        None
    }
}

impl ToText for bool {
    #[inline]
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(if *self { "1" } else { "" }))
    }
}

// Numbers
macro_rules! numeric_scalar {
    ($sort:ident => $($t:ty),*) => {$(
        impl Truthy for $t {
            #[inline]
            fn is_truthy(&self) -> bool {
                *self != 0 as $t
            }
        }

        impl LooseEq for $t {
            #[inline]
            fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
                self.partial_cmp(other)
            }

            #[inline]
            fn sort_cmp(&self, other: &Self) -> Ordering {
                self.$sort(other)
            }
        }

        impl ToText for $t {
            #[inline]
            fn to_text(&self) -> Option<Cow<'_, str>> {
                Some(Cow::Owned(self.to_string()))
            }
        }

        impl ToNumber for $t {
            #[inline]
            fn to_number(&self) -> Option<f64> {
                Some(*self as f64)
            }
        }
    )*};
}

numeric_scalar!(cmp => i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
numeric_scalar!(total_cmp => f32, f64);

macro_rules! integer_key {
    ($($t:ty),*) => {$(
        impl AsKey for $t {
            #[inline]
            fn to_key(&self) -> Option<Key> {
                Some(Key::from(*self))
            }
        }
    )*};
}

integer_key!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl AsKey for f64 {
    #[inline]
    fn to_key(&self) -> Option<Key> {
        self.is_finite().then(|| Key::Int(self.trunc() as i64))
    }

    #[inline]
    fn to_exact_key(&self) -> Option<Key> {
        None
    }
}

// Keys
impl AsKey for Key {
    #[inline]
    fn to_key(&self) -> Option<Key> {
        Some(self.clone())
    }
}

impl ToText for Key {
    #[inline]
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(match self {
            Key::Int(i) => Cow::Owned(i.to_string()),
            Key::Str(s) => Cow::Borrowed(s),
        })
    }
}

impl LooseEq for Key {
    fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => Some(a.cmp(b)),
            (Key::Str(a), Key::Str(b)) => compare_str(a, b),
            (Key::Int(a), Key::Str(b)) => Some(a.to_string().as_str().cmp(b)),
            (Key::Str(a), Key::Int(b)) => Some(a.as_str().cmp(b.to_string().as_str())),
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Str(a), Key::Str(b)) => sort_text(a, b),
            _ => sort_text(&self.to_string(), &other.to_string()),
        }
    }
}

// Containers
impl<T: Truthy> Truthy for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for Vec<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<V, S: BuildHasher> Record for hashbrown::HashMap<String, V, S> {
    type Field = V;

    #[inline]
    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}
