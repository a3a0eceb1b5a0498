//! Keys of an ordered collection.
//!
//! A [`Key`] is either an integer or a string. Strings that spell a canonical
//! decimal integer (`"0"`, `"17"`, `"-3"`) are normalized to [`Key::Int`] on
//! conversion, so `"1"` and `1` address the same entry and JSON object keys
//! round-trip back to integer keys.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a [`Collection`](crate::Collection) entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer key, auto-assigned by `push` or given explicitly
    Int(i64),
    /// Any string that is not a canonical decimal integer
    Str(String),
}

impl Key {
    /// Returns `true` for [`Key::Int`].
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns the integer value of an integer key.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Returns the string of a string key.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    /// Parses `s` as a canonical decimal integer: no sign other than a
    /// leading `-`, no leading zeros, no `-0`.
    fn canonical_int(s: &str) -> Option<i64> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        let canonical = match digits.as_bytes() {
            [] => false,
            [b'0'] => digits.len() == s.len(),
            [first, rest @ ..] => {
                first.is_ascii_digit() && *first != b'0' && rest.iter().all(u8::is_ascii_digit)
            }
        };
        if canonical {
            s.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

// Conversion Traits
impl From<&str> for Key {
    #[inline]
    fn from(s: &str) -> Self {
        match Key::canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_owned()),
        }
    }
}

impl From<String> for Key {
    #[inline]
    fn from(s: String) -> Self {
        match Key::canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl From<&String> for Key {
    #[inline]
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    #[inline]
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<bool> for Key {
    #[inline]
    fn from(b: bool) -> Self {
        Key::Int(i64::from(b))
    }
}

macro_rules! int_key {
    ($($t:ty),*) => {$(
        impl From<$t> for Key {
            #[inline]
            fn from(i: $t) -> Self {
                i64::try_from(i).map_or_else(|_| Key::Str(i.to_string()), Key::Int)
            }
        }
    )*};
}

int_key!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

// Serde Support
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(i) => ser.serialize_i64(*i),
            Key::Str(s) => ser.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct KeyVisitor;
        impl Visitor<'_> for KeyVisitor {
            type Value = Key;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string key")
            }

            #[inline]
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
                Ok(Key::Int(v))
            }

            #[inline]
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
                Ok(Key::from(v))
            }

            #[inline]
            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Key, E> {
                Ok(Key::from(v))
            }

            #[inline]
            fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                Ok(Key::from(v))
            }

            #[inline]
            fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
                Ok(Key::from(v))
            }
        }

        de.deserialize_any(KeyVisitor)
    }
}
