//! Property tests for collection invariants

#[cfg(feature = "collections")]
mod property_tests {
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::cmp::Ordering;
    use sugars_collection::{Collection, JsonOptions, Key, LooseEq, Truthy};

    fn mixed_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(json!(null)),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            (-1000.0f64..1000.0).prop_map(Value::from),
            (0u16..500).prop_map(|n| json!(n.to_string())),
            "[0-9a-z]{1,4}".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn prop_map_identity_is_noop(values in prop::collection::vec(any::<i64>(), 0..32)) {
            let c = Collection::from_values(values);
            prop_assert_eq!(c.map(|v, _| *v), c);
        }

        #[test]
        fn prop_filter_truthy_keeps_exactly_truthy(
            values in prop::collection::vec(-3i32..3, 0..32),
        ) {
            let c = Collection::from_values(values.clone());
            let kept = c.filter_truthy();
            prop_assert!(kept.values_iter().all(Truthy::is_truthy));
            prop_assert_eq!(kept.len(), values.iter().filter(|v| **v != 0).count());
            for (key, value) in &kept {
                prop_assert_eq!(c.get(key), Some(value));
            }
        }

        #[test]
        fn prop_reverse_twice_is_identity(values in prop::collection::vec(any::<u8>(), 0..32)) {
            let c = Collection::from_values(values);
            prop_assert_eq!(c.reverse().reverse(), c);
        }

        #[test]
        fn prop_unique_has_no_duplicates(values in prop::collection::vec(0u8..8, 0..32)) {
            let c = Collection::from_values(values);
            let unique = c.unique();
            let kept = unique.to_vec();
            for (i, a) in kept.iter().enumerate() {
                prop_assert!(kept[i + 1..].iter().all(|b| !a.loose_eq(b)));
            }
            prop_assert!(c.values_iter().all(|v| kept.contains(v)));
        }

        #[test]
        fn prop_slice_length(
            values in prop::collection::vec(any::<i32>(), 0..32),
            offset in 0i64..40,
            length in 0i64..40,
        ) {
            let c = Collection::from_values(values);
            let expected = (length as usize).min(c.len().saturating_sub(offset as usize));
            prop_assert_eq!(c.slice(offset, Some(length)).len(), expected);
        }

        #[test]
        fn prop_sort_orders_and_permutes(values in prop::collection::vec(any::<i32>(), 0..32)) {
            let c = Collection::from_values(values.clone());
            let sorted = c.sort().to_vec();
            prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
            let mut expected = values;
            expected.sort_unstable();
            prop_assert_eq!(sorted, expected);
        }

        #[test]
        fn prop_sort_mixed_values_is_ordered(
            values in prop::collection::vec(mixed_value(), 0..160),
        ) {
            let c = Collection::from_values(values.clone());
            let sorted = c.sort().to_vec();
            prop_assert_eq!(sorted.len(), values.len());
            prop_assert!(sorted.windows(2).all(|w| w[0].sort_cmp(&w[1]) != Ordering::Greater));
        }

        #[test]
        fn prop_push_never_reuses_removed_keys(
            values in prop::collection::vec(any::<i32>(), 1..32),
            removed in any::<prop::sample::Index>(),
        ) {
            let mut c = Collection::from_values(values);
            let len = c.len();
            c.forget(removed.index(len));
            c.push(0);
            prop_assert_eq!(c.keys_iter().last(), Some(&Key::Int(len as i64)));
        }

        #[test]
        fn prop_json_round_trip(
            entries in prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..16),
        ) {
            let c = Collection::make(entries);
            let text = c.to_json(JsonOptions::new()).unwrap();
            let back: Collection<i64> = Collection::from_json(&text).unwrap();
            prop_assert_eq!(back, c);
        }
    }
}
