//! Tests for feature combinations and edge cases

#[cfg(feature = "collections")]
mod record_types_tests {
    use hashbrown::HashMap;
    use pretty_assertions::assert_eq;
    use sugars_collection::{Collection, Key, Operator};

    fn row(name: &str, team: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("name".to_string(), name.to_string());
        map.insert("team".to_string(), team.to_string());
        map
    }

    #[test]
    fn test_hashbrown_maps_as_records() {
        let rows = Collection::from_values(vec![
            row("ada", "core"),
            row("bob", "infra"),
            row("cy", "core"),
        ]);
        let teams = rows.group_by("team");
        assert_eq!(teams.keys().to_vec(), vec![Key::from("core"), Key::from("infra")]);
        assert_eq!(
            teams["core"].pluck("name").to_vec(),
            vec!["ada".to_string(), "cy".to_string()]
        );

        let named = rows.where_op("name", Operator::Gt, &"b".to_string());
        assert_eq!(named.len(), 2);
        assert_eq!(rows.implode_field("name", "/").unwrap(), "ada/bob/cy");
    }

    #[test]
    fn test_nested_collections_as_records() {
        let rows = Collection::from_values(vec![
            Collection::make(vec![("id", 1), ("score", 10)]),
            Collection::make(vec![("id", 2), ("score", 30)]),
        ]);
        let by_id = rows.index_by("id");
        assert_eq!(by_id[2]["score"], 30);
        assert_eq!(rows.pluck("score").sum(), 40.0);
        assert_eq!(rows.where_op("score", Operator::Ge, &20).len(), 1);
    }

    #[test]
    fn test_collections_as_conditions() {
        let flags = Collection::from_values(vec![1]);
        let empty = Collection::<i32>::new();
        let c = Collection::from_values(vec!["a"]);
        assert_eq!(c.clone().when(flags, |c, _| c.concat(vec!["b"])).len(), 2);
        assert_eq!(c.clone().when(empty, |c, _| c.concat(vec!["b"])).len(), 1);
    }
}

#[cfg(all(feature = "macros", feature = "random"))]
mod full_features_tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sugars_collection::macros::collection::*;
    use sugars_collection::JsonOptions;

    #[test]
    fn test_full_features_macro_built_collection_sampled_and_encoded() {
        let c = json_collection! {
            "a" => 1,
            "b" => 2,
            "c" => 3,
        };
        let sample = c.random(2, &mut StdRng::seed_from_u64(11));
        assert_eq!(sample.len(), 2);
        assert!(!sample.is_list());

        let text = sample.to_json(JsonOptions::new()).unwrap();
        assert!(text.starts_with('{'));

        let shuffled = collection![1, 2, 3].shuffle(&mut StdRng::seed_from_u64(11));
        assert_eq!(shuffled.sum(), 6.0);
    }
}
