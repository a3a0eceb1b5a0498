//! Random sampling, driven by a caller-supplied [`rand::Rng`].

use super::collection::Collection;
use indexmap::IndexMap;
use rand::seq::{index, IteratorRandom, SliceRandom};
use rand::Rng;

impl<V: Clone> Collection<V> {
    /// Picks `min(count, len)` entries without replacement.
    ///
    /// Picked entries keep their keys and their relative order.
    pub fn random<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Self {
        let amount = count.min(self.len());
        let mut picked = index::sample(rng, self.len(), amount).into_vec();
        picked.sort_unstable();
        let items: IndexMap<_, _> = picked
            .into_iter()
            .filter_map(|i| self.items.get_index(i))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Collection::from_map(items)
    }

    /// Picks a single value, `None` when empty.
    pub fn random_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&V> {
        self.items.values().choose(rng)
    }

    /// Returns the values in shuffled order as a list keyed `0..n`.
    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut values = self.to_vec();
        values.shuffle(rng);
        Collection::from_values(values)
    }
}
