//! Tests for seeded random sampling

#[cfg(feature = "random")]
mod random_tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sugars_collection::Collection;

    fn numbers() -> Collection<i32> {
        Collection::make((0..10).map(|i| (format!("k{i}"), i)))
    }

    #[test]
    fn test_random_keeps_keys_and_relative_order() {
        let c = numbers();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = c.random(4, &mut rng);
        assert_eq!(picked.len(), 4);

        let values = picked.to_vec();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(values, sorted);
        for (key, value) in &picked {
            assert_eq!(c.get(key), Some(value));
        }
    }

    #[test]
    fn test_random_caps_at_length() {
        let c = numbers();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(c.random(50, &mut rng), c);
        assert!(c.random(0, &mut rng).is_empty());
        assert!(Collection::<i32>::new().random(3, &mut rng).is_empty());
    }

    #[test]
    fn test_random_is_reproducible_with_a_seed() {
        let c = numbers();
        let first = c.random(3, &mut StdRng::seed_from_u64(42));
        let second = c.random(3, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_one() {
        let c = numbers();
        let mut rng = StdRng::seed_from_u64(3);
        let one = c.random_one(&mut rng).copied();
        assert!(one.is_some_and(|v| (0..10).contains(&v)));
        assert_eq!(Collection::<i32>::new().random_one(&mut rng), None);
    }

    #[test]
    fn test_shuffle_returns_a_permuted_list() {
        let c = numbers();
        let shuffled = c.shuffle(&mut StdRng::seed_from_u64(9));
        assert!(shuffled.is_list());
        let mut values = shuffled.to_vec();
        values.sort_unstable();
        assert_eq!(values, c.to_vec());
        assert_eq!(c.len(), 10);
    }
}
