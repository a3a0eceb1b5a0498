//! Side-effecting and control-flow helpers.

use super::collection::Collection;
use crate::key::Key;
use crate::value::Truthy;

impl<V> Collection<V> {
    /// Calls `f(value, key)` for every entry in order.
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&V, &Key),
    {
        for (key, value) in &self.items {
            f(value, key);
        }
        self
    }

    /// Hands a copy of the collection to `f`. The receiver is unchanged.
    pub fn tap<F>(&self, f: F) -> &Self
    where
        V: Clone,
        F: FnOnce(&mut Collection<V>),
    {
        let mut copy = self.clone();
        f(&mut copy);
        self
    }

    /// Returns `f(self, condition)` when `condition` is truthy, `self` otherwise.
    pub fn when<C, F>(self, condition: C, f: F) -> Self
    where
        C: Truthy,
        F: FnOnce(Self, C) -> Self,
    {
        if condition.is_truthy() {
            f(self, condition)
        } else {
            self
        }
    }

    /// Returns `f(self, condition)` when `condition` is truthy, otherwise
    /// `fallback(self, condition)`.
    pub fn when_else<C, F, G>(self, condition: C, f: F, fallback: G) -> Self
    where
        C: Truthy,
        F: FnOnce(Self, C) -> Self,
        G: FnOnce(Self, C) -> Self,
    {
        if condition.is_truthy() {
            f(self, condition)
        } else {
            fallback(self, condition)
        }
    }

    /// Returns `f(self, condition)` when `condition` is falsy, `self` otherwise.
    pub fn unless<C, F>(self, condition: C, f: F) -> Self
    where
        C: Truthy,
        F: FnOnce(Self, C) -> Self,
    {
        if condition.is_truthy() {
            self
        } else {
            f(self, condition)
        }
    }

    /// Replaces every value with `f(value, key)` in place.
    pub fn transform<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&V, &Key) -> V,
    {
        for (key, value) in self.items.iter_mut() {
            *value = f(value, key);
        }
        self
    }

    /// Passes the collection to `f` and returns its result.
    #[inline]
    pub fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}
