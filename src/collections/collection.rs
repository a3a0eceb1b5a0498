// -----------------------------------------------------------------------------
// src/collections/collection.rs
// -----------------------------------------------------------------------------

use crate::error::{CollectionError, Result};
use crate::key::Key;
use crate::value::{Record, Truthy};
use indexmap::IndexMap;
use serde_json::Value;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered, key-unique mapping from [`Key`] to `V` with a fluent API.
///
/// Entries keep their insertion order through every operation that does not
/// explicitly re-key or re-order. Values appended without a key (`push`,
/// `concat`, integer-keyed `merge` entries) get the next free integer key.
///
/// ### Mutation and purity
/// Methods taking `&mut self` change the receiver in place and return it for
/// chaining. Methods taking `&self` build a new collection from a derived map
/// and never touch or alias the receiver's storage.
///
/// ### Indexed access
/// `collection[key]` panics when the key is absent, like
/// [`std::collections::HashMap`]. Use [`Collection::get`] for an optional read
/// or [`Collection::fetch`] for a [`CollectionError::MissingKey`] result.
///
/// ### Examples
/// ```rust
/// use sugars_collection::Collection;
/// use serde_json::json;
///
/// let mut users = Collection::from_values(vec![json!({"name": "ada"})]);
/// users.push(json!({"name": "grace"})).put("admin", json!({"name": "linus"}));
/// assert_eq!(users.len(), 3);
/// assert_eq!(users[1], json!({"name": "grace"}));
/// ```
#[derive(Debug, Clone)]
pub struct Collection<V = Value> {
    pub(crate) items: IndexMap<Key, V>,
    /// Next auto-assigned integer key, `None` once `i64::MAX` is taken.
    pub(crate) next_index: Option<i64>,
}

// Core API
impl<V> Collection<V> {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Collection {
            items: IndexMap::new(),
            next_index: Some(0),
        }
    }

    /// Creates a collection from ordered key-value pairs, keeping keys and order.
    ///
    /// A key repeated later in `items` overwrites the earlier value in place.
    #[inline]
    pub fn make<K, I>(items: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        items.into_iter().collect()
    }

    /// Creates a list collection keyed `0..n`.
    pub fn from_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        let mut collection = Self::new();
        for value in values {
            collection.push(value);
        }
        collection
    }

    /// Adopts an existing map verbatim.
    pub(crate) fn from_map(items: IndexMap<Key, V>) -> Self {
        let next_index = items
            .keys()
            .filter_map(Key::as_int)
            .filter(|i| *i >= 0)
            .max()
            .map_or(Some(0), |i| i.checked_add(1));
        Collection { items, next_index }
    }

    #[inline]
    fn track(&mut self, key: &Key) {
        if let (Key::Int(i), Some(next)) = (key, self.next_index) {
            if *i >= next {
                self.next_index = i.checked_add(1);
            }
        }
    }

    /// Reserves the next auto-assigned integer key.
    pub(crate) fn next_key(&mut self) -> Result<Key> {
        let next = self.next_index.ok_or(CollectionError::KeysExhausted)?;
        self.next_index = next.checked_add(1);
        Ok(Key::Int(next))
    }

    /// Returns the value at `key`, if present.
    #[inline]
    pub fn get(&self, key: impl Into<Key>) -> Option<&V> {
        self.items.get(&key.into())
    }

    /// Returns a mutable reference to the value at `key`, if present.
    #[inline]
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut V> {
        self.items.get_mut(&key.into())
    }

    /// Returns a copy of the value at `key`, or `default` when absent.
    #[inline]
    pub fn get_or(&self, key: impl Into<Key>, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns a copy of the value at `key`, or the result of `default` when absent.
    #[inline]
    pub fn get_or_else<F: FnOnce() -> V>(&self, key: impl Into<Key>, default: F) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or_else(default)
    }

    /// Returns the value at `key` or a [`CollectionError::MissingKey`].
    pub fn fetch(&self, key: impl Into<Key>) -> Result<&V> {
        let key = key.into();
        self.items.get(&key).ok_or(CollectionError::MissingKey(key))
    }

    /// Mutable counterpart of [`Collection::fetch`].
    pub fn fetch_mut(&mut self, key: impl Into<Key>) -> Result<&mut V> {
        let key = key.into();
        self.items.get_mut(&key).ok_or(CollectionError::MissingKey(key))
    }

    /// Checks whether `key` is present.
    #[inline]
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into())
    }

    /// Checks whether every one of `keys` is present.
    pub fn has_all<K, I>(&self, keys: I) -> bool
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().all(|key| self.has(key))
    }

    /// Inserts or overwrites the value at `key`. An existing key keeps its position.
    pub fn put(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        let key = key.into();
        self.track(&key);
        self.items.insert(key, value);
        self
    }

    /// Appends `value` under the next integer key.
    ///
    /// Once `i64::MAX` has been used as a key there is no next integer key:
    /// the value is dropped with a warning and nothing is overwritten. Use
    /// [`Collection::try_push`] to get the error instead.
    pub fn push(&mut self, value: V) -> &mut Self {
        if let Err(err) = self.try_push(value) {
            log::warn!("push: {err}, value dropped");
        }
        self
    }

    /// Appends `value` under the next integer key, failing with
    /// [`CollectionError::KeysExhausted`] when there is none.
    pub fn try_push(&mut self, value: V) -> Result<&mut Self> {
        let key = self.next_key()?;
        self.items.insert(key, value);
        Ok(self)
    }

    /// Stores `value` as the new first entry under a fresh integer key.
    ///
    /// Sibling keys are left untouched. Like [`Collection::push`], the value
    /// is dropped with a warning when no integer key is left.
    pub fn prepend(&mut self, value: V) -> &mut Self {
        if let Err(err) = self.try_prepend(value) {
            log::warn!("prepend: {err}, value dropped");
        }
        self
    }

    /// Checked form of [`Collection::prepend`].
    pub fn try_prepend(&mut self, value: V) -> Result<&mut Self> {
        let key = self.next_key()?;
        self.items.shift_insert(0, key, value);
        Ok(self)
    }

    /// Stores `value` as the new first entry under `key`, replacing any
    /// existing entry with that key.
    pub fn prepend_with_key(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        let key = key.into();
        self.track(&key);
        self.items.shift_insert(0, key, value);
        self
    }

    /// Removes and returns the value at `key`.
    #[inline]
    pub fn pull(&mut self, key: impl Into<Key>) -> Option<V> {
        self.items.shift_remove(&key.into())
    }

    /// Removes and returns the value at `key`, or `default` when absent.
    #[inline]
    pub fn pull_or(&mut self, key: impl Into<Key>, default: V) -> V {
        self.pull(key).unwrap_or(default)
    }

    /// Removes `key`. Missing keys are ignored.
    #[inline]
    pub fn forget(&mut self, key: impl Into<Key>) -> &mut Self {
        self.items.shift_remove(&key.into());
        self
    }

    /// Removes every one of `keys`. Missing keys are ignored.
    pub fn forget_many<K, I>(&mut self, keys: I) -> &mut Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.forget(key);
        }
        self
    }

    /// Removes and returns the last value.
    #[inline]
    pub fn pop(&mut self) -> Option<V> {
        self.items.pop().map(|(_, value)| value)
    }

    /// Removes and returns the first value. Remaining keys are not renumbered.
    #[inline]
    pub fn shift(&mut self) -> Option<V> {
        self.items.shift_remove_index(0).map(|(_, value)| value)
    }

    /// Removes every entry and resets auto-assigned keys.
    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self.next_index = Some(0);
        self
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks if the collection has at least one entry.
    #[inline]
    pub fn is_not_empty(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the first value, if any.
    #[inline]
    pub fn first(&self) -> Option<&V> {
        self.items.first().map(|(_, value)| value)
    }

    /// Returns the last value, if any.
    #[inline]
    pub fn last(&self) -> Option<&V> {
        self.items.last().map(|(_, value)| value)
    }

    /// Returns an iterator over `(key, value)` pairs in order.
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, V> {
        self.items.iter()
    }

    /// Returns an iterator over `(key, value)` pairs with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Key, V> {
        self.items.iter_mut()
    }

    /// Returns an iterator over the keys in order.
    #[inline]
    pub fn keys_iter(&self) -> indexmap::map::Keys<'_, Key, V> {
        self.items.keys()
    }

    /// Returns an iterator over the values in order.
    #[inline]
    pub fn values_iter(&self) -> indexmap::map::Values<'_, Key, V> {
        self.items.values()
    }

    /// Borrows the underlying ordered map.
    #[inline]
    pub fn as_map(&self) -> &IndexMap<Key, V> {
        &self.items
    }

    /// Returns a copy of the underlying ordered map.
    #[inline]
    pub fn to_array(&self) -> IndexMap<Key, V>
    where
        V: Clone,
    {
        self.items.clone()
    }

    /// Returns the values in order, dropping keys.
    #[inline]
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.items.values().cloned().collect()
    }

    /// Consumes the collection, returning the underlying ordered map.
    #[inline]
    pub fn into_inner(self) -> IndexMap<Key, V> {
        self.items
    }

    /// Consumes the collection, returning its values in order.
    #[inline]
    pub fn into_values(self) -> indexmap::map::IntoValues<Key, V> {
        self.items.into_values()
    }
}

impl<V> Default for Collection<V> {
    #[inline]
    fn default() -> Self {
        Collection::new()
    }
}

// Order-sensitive equality
impl<V: PartialEq> PartialEq for Collection<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for Collection<V> {}

// Subscript access
impl<V, K: Into<Key>> Index<K> for Collection<V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        let key = key.into();
        match self.items.get(&key) {
            Some(value) => value,
            None => panic!("Undefined key: {key}"),
        }
    }
}

impl<V, K: Into<Key>> IndexMut<K> for Collection<V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        let key = key.into();
        match self.items.get_mut(&key) {
            Some(value) => value,
            None => panic!("Undefined key: {key}"),
        }
    }
}

// Owned iterator
impl<V> IntoIterator for Collection<V> {
    type Item = (Key, V);
    type IntoIter = indexmap::map::IntoIter<Key, V>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// Borrowed iterator
impl<'a, V> IntoIterator for &'a Collection<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = indexmap::map::Iter<'a, Key, V>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Conversion Traits
impl<K: Into<Key>, V> FromIterator<(K, V)> for Collection<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Collection::new();
        collection.extend(iter);
        collection
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for Collection<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> From<Vec<V>> for Collection<V> {
    #[inline]
    fn from(values: Vec<V>) -> Self {
        Collection::from_values(values)
    }
}

impl<V> From<IndexMap<Key, V>> for Collection<V> {
    #[inline]
    fn from(items: IndexMap<Key, V>) -> Self {
        Collection::from_map(items)
    }
}

impl<V> From<Collection<V>> for IndexMap<Key, V> {
    #[inline]
    fn from(collection: Collection<V>) -> Self {
        collection.items
    }
}

impl<V> Truthy for Collection<V> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.is_not_empty()
    }
}

impl<V> Record for Collection<V> {
    type Field = V;

    #[inline]
    fn field(&self, name: &str) -> Option<&V> {
        self.items.get(&Key::from(name))
    }
}
