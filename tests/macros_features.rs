//! Tests for macros features

#[cfg(feature = "macros")]
mod macros_tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use sugars_collection::macros::collection::*;
    use sugars_collection::{Collection, Key};

    #[test]
    fn test_macros_collection_list() {
        let c = collection![1, 2, 3];
        assert!(c.is_list());
        assert_eq!(c.to_vec(), vec![1, 2, 3]);

        let single = collection!["only"];
        assert_eq!(single.first(), Some(&"only"));

        let empty: Collection<i32> = collection![];
        assert!(empty.is_empty());
    }

    #[test]
    fn test_macros_collection_keyed() {
        let c = collection! {
            "b" => 2,
            "a" => 1,
            "10" => 10,
        };
        let keys: Vec<Key> = c.keys().to_vec();
        assert_eq!(keys, vec![Key::from("b"), Key::from("a"), Key::Int(10)]);

        let mut c = c;
        c.push(11);
        assert_eq!(c.get(11), Some(&11));
    }

    #[test]
    fn test_macros_collection_expressions() {
        let base = 5;
        let c = collection![base * 2, base + 1];
        assert_eq!(c.to_vec(), vec![10, 6]);

        let name = String::from("ada");
        let keyed = collection! { name.as_str() => base };
        assert_eq!(keyed.get("ada"), Some(&5));
    }

    #[test]
    fn test_macros_json_collection_list() {
        let c = json_collection![1, "two", null, {"three": 3}, [4]];
        assert_eq!(c.len(), 5);
        assert_eq!(c[1], json!("two"));
        assert_eq!(c[3]["three"], json!(3));
        assert_eq!(c.to_string(), r#"[1,"two",null,{"three":3},[4]]"#);

        let empty = json_collection![];
        assert_eq!(empty, Collection::<Value>::new());
    }

    #[test]
    fn test_macros_json_collection_keyed() {
        let c = json_collection! {
            "name" => "ada",
            "tags" => ["x", "y"],
            3 => {"nested": true},
        };
        assert_eq!(c.to_string(), r#"{"name":"ada","tags":["x","y"],"3":{"nested":true}}"#);
        assert_eq!(c.pluck("nested").to_vec(), vec![json!(true)]);
    }
}
