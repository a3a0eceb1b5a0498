// -----------------------------------------------------------------------------
// src/collections/json.rs
// -----------------------------------------------------------------------------

use super::collection::Collection;
use crate::error::Result;
use crate::key::Key;
use serde::de::{DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Encoding flags for [`Collection::to_json`].
///
/// ### Examples
/// ```rust
/// use sugars_collection::{Collection, JsonOptions};
///
/// let list = Collection::from_values(vec![1, 2]);
/// assert_eq!(list.to_json(JsonOptions::new()).unwrap(), "[1,2]");
/// assert_eq!(
///     list.to_json(JsonOptions::new().force_object(true)).unwrap(),
///     r#"{"0":1,"1":2}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    pretty: bool,
    force_object: bool,
}

impl JsonOptions {
    /// Compact output, lists as arrays.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indents the output.
    #[inline]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Encodes lists as objects too.
    #[inline]
    pub fn force_object(mut self, force_object: bool) -> Self {
        self.force_object = force_object;
        self
    }

    /// Whether output is indented.
    #[inline]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Whether lists are encoded as objects.
    #[inline]
    pub fn is_force_object(&self) -> bool {
        self.force_object
    }
}

impl<V> Collection<V> {
    /// Checks whether the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.items
            .keys()
            .enumerate()
            .all(|(i, key)| key.as_int() == Some(i as i64))
    }

    /// Encodes the collection as JSON.
    ///
    /// Lists become arrays and everything else becomes an object, unless
    /// `options` forces objects. Fails with
    /// [`CollectionError::Json`](crate::CollectionError::Json) when a value
    /// cannot be encoded.
    pub fn to_json(&self, options: JsonOptions) -> Result<String>
    where
        V: Serialize,
    {
        let json = match (options.force_object, options.pretty) {
            (true, true) => serde_json::to_string_pretty(&AsObject(self))?,
            (true, false) => serde_json::to_string(&AsObject(self))?,
            (false, true) => serde_json::to_string_pretty(self)?,
            (false, false) => serde_json::to_string(self)?,
        };
        Ok(json)
    }

    /// Decodes a collection from a JSON array, object or `null`.
    pub fn from_json(json: &str) -> Result<Self>
    where
        V: DeserializeOwned,
    {
        Ok(serde_json::from_str(json)?)
    }
}

struct AsObject<'a, V>(&'a Collection<V>);

impl<V: Serialize> Serialize for AsObject<'_, V> {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// Serde Support
impl<V: Serialize> Serialize for Collection<V> {
    fn serialize<S: Serializer>(&self, ser: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = ser.serialize_seq(Some(self.len()))?;
            for value in self.values_iter() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            AsObject(self).serialize(ser)
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Collection<V> {
    fn deserialize<D: Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        struct CollectionVisitor<V>(PhantomData<V>);
        impl<'de, V: Deserialize<'de>> Visitor<'de> for CollectionVisitor<V> {
            type Value = Collection<V>;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("null, a sequence, or a map")
            }

            #[inline]
            fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(Collection::new())
            }

            #[inline]
            fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(Collection::new())
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut collection = Collection::new();
                while let Some(value) = seq.next_element()? {
                    collection.push(value);
                }
                Ok(collection)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut collection = Collection::new();
                while let Some((key, value)) = map.next_entry::<Key, V>()? {
                    collection.put(key, value);
                }
                Ok(collection)
            }
        }

        de.deserialize_any(CollectionVisitor(PhantomData))
    }
}

/// Compact JSON, as [`Collection::to_json`] with default options.
///
/// Formatting never fails: a collection holding a value that cannot be
/// encoded is written as `null` and the error is logged. Call
/// [`Collection::to_json`] to get the error.
impl<V: Serialize> fmt::Display for Collection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json(JsonOptions::default()) {
            Ok(json) => f.write_str(&json),
            Err(err) => {
                log::warn!("display: {err}, writing null");
                f.write_str("null")
            }
        }
    }
}
