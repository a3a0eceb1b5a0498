//! Aggregation and query operations.

use super::collection::Collection;
use crate::error::{CollectionError, Result};
use crate::key::Key;
use crate::value::{Comparison, LooseEq, Operator, Record, ToNumber, ToText};
use std::cmp::Ordering;

impl<V> Collection<V> {
    /// Checks whether some value matches `needle` under `comparison`.
    pub fn contains(&self, needle: &V, comparison: Comparison) -> bool
    where
        V: LooseEq + PartialEq,
    {
        self.search(needle, comparison).is_some()
    }

    /// Checks whether `predicate(value, key)` holds for some entry.
    pub fn contains_where<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.items.iter().any(|(key, value)| predicate(value, key))
    }

    /// Returns the key of the first value matching `needle` under `comparison`.
    pub fn search(&self, needle: &V, comparison: Comparison) -> Option<Key>
    where
        V: LooseEq + PartialEq,
    {
        self.search_by(|value, _| comparison.matches(value, needle))
    }

    /// Returns the key of the first entry for which `predicate(value, key)` holds.
    pub fn search_by<F>(&self, mut predicate: F) -> Option<Key>
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.items
            .iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(key, _)| key.clone())
    }

    /// Returns the first value for which `predicate(value, key)` holds.
    pub fn first_where<F>(&self, mut predicate: F) -> Option<&V>
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.items
            .iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Checks whether `predicate(value, key)` holds for every entry.
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&V, &Key) -> bool,
    {
        self.items.iter().all(|(key, value)| predicate(value, key))
    }

    /// Folds the entries in order.
    pub fn reduce<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &V, &Key) -> A,
    {
        self.items
            .iter()
            .fold(init, |acc, (key, value)| f(acc, value, key))
    }

    /// Joins the values with `glue`.
    ///
    /// Fails with [`CollectionError::NotStringable`] on the first value without
    /// a text form.
    pub fn implode(&self, glue: &str) -> Result<String>
    where
        V: ToText,
    {
        let mut joined = String::new();
        for (i, (key, value)) in self.items.iter().enumerate() {
            let Some(text) = value.to_text() else {
                log::warn!("implode: value at key {key} has no text form");
                return Err(CollectionError::NotStringable(key.clone()));
            };
            if i > 0 {
                joined.push_str(glue);
            }
            joined.push_str(&text);
        }
        Ok(joined)
    }

    /// Joins the `field` of every item with `glue`.
    pub fn implode_field(&self, field: &str, glue: &str) -> Result<String>
    where
        V: Record,
        V::Field: Clone + ToText,
    {
        self.field_values(field).implode(glue)
    }

    fn field_values(&self, field: &str) -> Collection<V::Field>
    where
        V: Record,
        V::Field: Clone,
    {
        Collection::from_values(self.items.values().filter_map(|item| item.field(field).cloned()))
    }

    /// Keeps the items whose `field` satisfies `field <op> value`.
    ///
    /// Items without `field` compare as `V::Field::default()`, which is
    /// `Value::Null` for JSON items.
    pub fn where_op(&self, field: &str, op: Operator, value: &V::Field) -> Self
    where
        V: Record + Clone,
        V::Field: LooseEq + PartialEq + Default,
    {
        let missing = V::Field::default();
        self.filter(|item, _| op.apply(item.field(field).unwrap_or(&missing), value))
    }

    /// Keeps the items whose `field` loosely equals `value`.
    pub fn where_eq(&self, field: &str, value: &V::Field) -> Self
    where
        V: Record + Clone,
        V::Field: LooseEq + PartialEq + Default,
    {
        self.where_op(field, Operator::Eq, value)
    }

    /// Sums the numeric form of every value. Values without one count as zero.
    pub fn sum(&self) -> f64
    where
        V: ToNumber,
    {
        self.items.values().filter_map(ToNumber::to_number).sum()
    }

    /// Mean of the numeric values, `None` when there are none.
    pub fn avg(&self) -> Option<f64>
    where
        V: ToNumber,
    {
        let numbers: Vec<f64> = self.items.values().filter_map(ToNumber::to_number).collect();
        if numbers.is_empty() {
            None
        } else {
            Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
        }
    }

    /// Smallest value under loose ordering; the first one wins ties.
    pub fn min(&self) -> Option<&V>
    where
        V: LooseEq,
    {
        self.items.values().reduce(|best, value| {
            match value.loose_cmp(best) {
                Some(Ordering::Less) => value,
                _ => best,
            }
        })
    }

    /// Largest value under loose ordering; the first one wins ties.
    pub fn max(&self) -> Option<&V>
    where
        V: LooseEq,
    {
        self.items.values().reduce(|best, value| {
            match value.loose_cmp(best) {
                Some(Ordering::Greater) => value,
                _ => best,
            }
        })
    }
}
