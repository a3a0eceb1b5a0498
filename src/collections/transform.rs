//! Pure transformations: every method borrows the receiver and returns a new
//! [`Collection`] built from a derived map.

use super::collection::Collection;
use crate::key::Key;
use crate::value::{AsKey, LooseEq, Record, Truthy};
use hashbrown::HashSet;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// How keys are compared by [`Collection::sort_keys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Numeric keys (integers and numeric strings) by value, then the other
    /// strings lexically
    #[default]
    Regular,
    /// Keys as numbers, non-numeric strings count as zero
    Numeric,
    /// Keys as text
    String,
    /// Case-folded text, ties broken by raw text
    Locale,
}

impl SortMode {
    /// Compares two keys in this mode.
    pub fn compare(self, a: &Key, b: &Key) -> Ordering {
        match self {
            SortMode::Regular => a.sort_cmp(b),
            SortMode::Numeric => {
                let number = |key: &Key| match key {
                    Key::Int(i) => *i as f64,
                    Key::Str(s) => s.trim().parse::<f64>().unwrap_or(0.0),
                };
                number(a).total_cmp(&number(b))
            }
            SortMode::String => a.to_string().cmp(&b.to_string()),
            SortMode::Locale => {
                let (a, b) = (a.to_string(), b.to_string());
                a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(&b))
            }
        }
    }
}

fn key_set<K, I>(keys: I) -> HashSet<Key>
where
    K: Into<Key>,
    I: IntoIterator<Item = K>,
{
    keys.into_iter().map(Into::into).collect()
}

impl<V: Clone> Collection<V> {
    fn derive<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Key, &V) -> bool,
    {
        let items: IndexMap<Key, V> = self
            .items
            .iter()
            .filter(|(key, value)| keep(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Collection::from_map(items)
    }

    /// Keeps the entries for which `predicate(value, key)` holds.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.derive(|key, value| predicate(value, key))
    }

    /// Drops the entries for which `predicate(value, key)` holds.
    pub fn reject<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.derive(|key, value| !predicate(value, key))
    }

    /// Keeps the truthy values.
    pub fn filter_truthy(&self) -> Self
    where
        V: Truthy,
    {
        self.derive(|_, value| value.is_truthy())
    }

    /// Keeps every entry except those under `keys`.
    pub fn except<K, I>(&self, keys: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        let keys = key_set(keys);
        self.derive(|key, _| !keys.contains(key))
    }

    /// Keeps only the entries under `keys`, in the receiver's order.
    pub fn only<K, I>(&self, keys: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        self.intersect_by_keys(keys)
    }

    /// Keeps the entries whose key appears in `keys`.
    pub fn intersect_by_keys<K, I>(&self, keys: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        let keys = key_set(keys);
        self.derive(|key, _| keys.contains(key))
    }

    /// Keeps the values loosely equal to none of `values`.
    pub fn diff<I: IntoIterator<Item = V>>(&self, values: I) -> Self
    where
        V: LooseEq,
    {
        let values: Vec<V> = values.into_iter().collect();
        self.derive(|_, value| !values.iter().any(|other| value.loose_eq(other)))
    }

    /// Keeps the values loosely equal to at least one of `values`.
    pub fn intersect<I: IntoIterator<Item = V>>(&self, values: I) -> Self
    where
        V: LooseEq,
    {
        let values: Vec<V> = values.into_iter().collect();
        self.derive(|_, value| values.iter().any(|other| value.loose_eq(other)))
    }

    /// Right-biased union with `entries`.
    ///
    /// Entries under a non-negative integer key are appended with a fresh key.
    /// Every other entry overwrites the same key in place or is added at the end.
    pub fn merge<K, I>(&self, entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut merged = self.clone();
        for (key, value) in entries {
            match key.into() {
                Key::Int(i) if i >= 0 => merged.push(value),
                key => merged.put(key, value),
            };
        }
        merged
    }

    /// Appends every one of `values` under fresh integer keys.
    pub fn concat<I: IntoIterator<Item = V>>(&self, values: I) -> Self {
        let mut concatenated = self.clone();
        for value in values {
            concatenated.push(value);
        }
        concatenated
    }

    /// Returns the entries from `offset` on, keys preserved.
    ///
    /// A negative `offset` counts from the end. `length` of `None` runs to the
    /// end, a negative `length` stops that many entries before the end.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Self {
        let len = self.len() as i64;
        let start = if offset < 0 { (len + offset).max(0) } else { offset.min(len) };
        let end = match length {
            None => len,
            Some(n) if n < 0 => (len + n).max(start),
            Some(n) => start.saturating_add(n).min(len),
        };
        let items: IndexMap<Key, V> = self
            .items
            .iter()
            .skip(start as usize)
            .take((end - start) as usize)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Collection::from_map(items)
    }

    /// First `limit` entries, or the last `-limit` entries when negative.
    pub fn take(&self, limit: i64) -> Self {
        if limit < 0 {
            self.slice(limit, None)
        } else {
            self.slice(0, Some(limit))
        }
    }

    /// Returns page `page` (1-based) of `per_page` entries.
    pub fn for_page(&self, page: i64, per_page: i64) -> Self {
        let offset = page.saturating_sub(1).saturating_mul(per_page).max(0);
        self.slice(offset, Some(per_page))
    }

    /// Splits into chunks of `size` entries, keys preserved inside each chunk.
    pub fn chunk(&self, size: usize) -> Collection<Collection<V>> {
        if size == 0 {
            return Collection::new();
        }
        let pairs: Vec<(&Key, &V)> = self.items.iter().collect();
        Collection::from_values(pairs.chunks(size).map(|chunk| {
            chunk
                .iter()
                .map(|(key, value)| ((*key).clone(), (*value).clone()))
                .collect::<Collection<V>>()
        }))
    }

    /// Reverses the order, keeping each key paired with its value.
    pub fn reverse(&self) -> Self {
        let mut items = self.items.clone();
        items.reverse();
        Collection::from_map(items)
    }

    /// Keeps the first of each group of loosely equal values.
    pub fn unique(&self) -> Self
    where
        V: LooseEq,
    {
        let mut seen: Vec<&V> = Vec::new();
        let items: IndexMap<Key, V> = self
            .items
            .iter()
            .filter(|(_, value)| {
                let fresh = !seen.iter().any(|kept| kept.loose_eq(value));
                if fresh {
                    seen.push(*value);
                }
                fresh
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Collection::from_map(items)
    }

    /// Keeps the first of each group of strictly equal values.
    pub fn unique_strict(&self) -> Self
    where
        V: PartialEq,
    {
        let mut seen: Vec<&V> = Vec::new();
        let items: IndexMap<Key, V> = self
            .items
            .iter()
            .filter(|(_, value)| {
                let fresh = !seen.contains(value);
                if fresh {
                    seen.push(*value);
                }
                fresh
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Collection::from_map(items)
    }

    /// Swaps keys and values. Only integer and string values become keys;
    /// null, booleans, floats and containers are skipped. On a collision the
    /// last entry wins.
    pub fn flip(&self) -> Collection<Key>
    where
        V: AsKey,
    {
        let mut flipped = Collection::new();
        for (key, value) in &self.items {
            match value.to_exact_key() {
                Some(new_key) => {
                    if flipped.has(&new_key) {
                        log::debug!("flip: key {new_key} produced twice, keeping the last");
                    }
                    flipped.put(new_key, key.clone());
                }
                None => log::trace!("flip: value at key {key} cannot be a key, skipped"),
            }
        }
        flipped
    }

    /// Groups the values into list buckets keyed by `bucket(value, key)`.
    /// Values for which `bucket` returns `None` are skipped.
    pub fn group_by_with<F>(&self, mut bucket: F) -> Collection<Collection<V>>
    where
        F: FnMut(&V, &Key) -> Option<Key>,
    {
        let mut groups: Collection<Collection<V>> = Collection::new();
        for (key, value) in &self.items {
            let Some(group) = bucket(value, key) else {
                log::trace!("group_by: no bucket for key {key}, skipped");
                continue;
            };
            match groups.get_mut(&group) {
                Some(members) => {
                    members.push(value.clone());
                }
                None => {
                    groups.put(group, Collection::from_values([value.clone()]));
                }
            }
        }
        groups
    }

    /// Groups the items into list buckets keyed by their `field`.
    pub fn group_by(&self, field: &str) -> Collection<Collection<V>>
    where
        V: Record,
        V::Field: AsKey,
    {
        self.group_by_with(|item, _| item.field(field).and_then(AsKey::to_key))
    }

    /// Keys the values by `index(value, key)`, keeping the last value per key.
    pub fn index_by_with<F>(&self, mut index: F) -> Self
    where
        F: FnMut(&V, &Key) -> Option<Key>,
    {
        let mut indexed = Collection::new();
        for (key, value) in &self.items {
            match index(value, key) {
                Some(new_key) => {
                    if indexed.has(&new_key) {
                        log::debug!("index_by: key {new_key} produced twice, keeping the last");
                    }
                    indexed.put(new_key, value.clone());
                }
                None => log::trace!("index_by: no key for entry {key}, skipped"),
            }
        }
        indexed
    }

    /// Keys the items by their `field`, keeping the last item per key.
    pub fn index_by(&self, field: &str) -> Self
    where
        V: Record,
        V::Field: AsKey,
    {
        self.index_by_with(|item, _| item.field(field).and_then(AsKey::to_key))
    }

    /// Extracts `field` from every item into a list. Items without it are skipped.
    pub fn pluck(&self, field: &str) -> Collection<V::Field>
    where
        V: Record,
        V::Field: Clone,
    {
        let mut plucked = Collection::new();
        for (key, item) in &self.items {
            match item.field(field) {
                Some(value) => {
                    plucked.push(value.clone());
                }
                None => log::trace!("pluck: item {key} has no field '{field}', skipped"),
            }
        }
        plucked
    }

    /// Extracts `field` from every item, keyed by the item's `index_field`.
    /// Items without `index_field` are appended under a fresh integer key.
    pub fn pluck_keyed(&self, field: &str, index_field: &str) -> Collection<V::Field>
    where
        V: Record,
        V::Field: Clone + AsKey,
    {
        let mut plucked = Collection::new();
        for (key, item) in &self.items {
            let Some(value) = item.field(field) else {
                log::trace!("pluck: item {key} has no field '{field}', skipped");
                continue;
            };
            match item.field(index_field).and_then(AsKey::to_key) {
                Some(index) => plucked.put(index, value.clone()),
                None => plucked.push(value.clone()),
            };
        }
        plucked
    }

    /// Stable sort by `compare`, keeping each key paired with its value.
    ///
    /// `compare` must be a total order.
    pub fn sort_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut items = self.items.clone();
        items.sort_by(|_, a, _, b| compare(a, b));
        Collection::from_map(items)
    }

    /// Ascending sort by [`LooseEq::sort_cmp`].
    pub fn sort(&self) -> Self
    where
        V: LooseEq,
    {
        self.sort_by(|a, b| a.sort_cmp(b))
    }

    /// Descending sort by [`LooseEq::sort_cmp`].
    pub fn sort_desc(&self) -> Self
    where
        V: LooseEq,
    {
        self.sort_by(|a, b| b.sort_cmp(a))
    }

    /// Sorts by key in `mode`, keeping each key paired with its value.
    pub fn sort_keys(&self, mode: SortMode, descending: bool) -> Self {
        let mut items = self.items.clone();
        items.sort_by(|a, _, b, _| {
            let ord = mode.compare(a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        Collection::from_map(items)
    }

    fn splice_at<K, I>(&self, at: usize, entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut items: IndexMap<Key, V> = IndexMap::with_capacity(self.len());
        let mut add = |key: Key, value: V| {
            items.entry(key).or_insert(value);
        };
        for (key, value) in self.items.iter().take(at) {
            add(key.clone(), value.clone());
        }
        for (key, value) in entries {
            add(key.into(), value);
        }
        for (key, value) in self.items.iter().skip(at) {
            add(key.clone(), value.clone());
        }
        Collection::from_map(items)
    }

    /// Splices `entries` in front of `key`. When `key` is absent the values are
    /// prepended as one block, each under a fresh integer key in order.
    pub fn insert_before<K, I>(&self, key: impl Into<Key>, entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let key = key.into();
        match self.items.get_index_of(&key) {
            Some(at) => self.splice_at(at, entries),
            None => {
                log::debug!("insert_before: key {key} absent, prepending");
                let mut reserved = self.clone();
                let mut fresh = Vec::new();
                for (_, value) in entries {
                    match reserved.next_key() {
                        Ok(key) => fresh.push((key, value)),
                        Err(err) => log::warn!("insert_before: {err}, value dropped"),
                    }
                }
                let mut inserted = self.splice_at(0, fresh);
                inserted.next_index = reserved.next_index;
                inserted
            }
        }
    }

    /// Splices `entries` right after `key`. When `key` is absent every entry is
    /// pushed under a fresh integer key.
    pub fn insert_after<K, I>(&self, key: impl Into<Key>, entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        let key = key.into();
        match self.items.get_index_of(&key) {
            Some(at) => self.splice_at(at + 1, entries),
            None => {
                log::debug!("insert_after: key {key} absent, pushing");
                self.concat(entries.into_iter().map(|(_, value)| value))
            }
        }
    }

    /// Returns the keys as a list.
    pub fn keys(&self) -> Collection<Key> {
        Collection::from_values(self.items.keys().cloned())
    }

    /// Returns the values as a list keyed `0..n`.
    pub fn values(&self) -> Self {
        Collection::from_values(self.items.values().cloned())
    }
}

impl<V> Collection<V> {
    /// Applies `f(value, key)` to every entry, keeping keys and order.
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(&V, &Key) -> U,
    {
        let items: IndexMap<Key, U> = self
            .items
            .iter()
            .map(|(key, value)| (key.clone(), f(value, key)))
            .collect();
        Collection {
            items,
            next_index: self.next_index,
        }
    }

    /// Builds a new collection from the `(key, value)` pairs `f` returns.
    /// A key produced twice keeps the last value.
    pub fn map_with_keys<K, U, F>(&self, mut f: F) -> Collection<U>
    where
        K: Into<Key>,
        F: FnMut(&V, &Key) -> (K, U),
    {
        self.items.iter().map(|(key, value)| f(value, key)).collect()
    }
}
