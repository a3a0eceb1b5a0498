//! Tests for searching, filtering by field and aggregating

#[cfg(feature = "collections")]
mod query_tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use sugars_collection::{Collection, CollectionError, Comparison, Key, Operator};

    fn users() -> Collection<Value> {
        Collection::from_values(vec![
            json!({"name": "ada", "age": 30, "team": "core"}),
            json!({"name": "bob", "age": 10, "team": "infra"}),
            json!({"name": "cy", "age": 20, "team": "core"}),
            json!({"name": "dee"}),
        ])
    }

    #[test]
    fn test_query_contains_loose_and_strict() {
        let c = Collection::from_values(vec![json!(1), json!("2"), json!(null)]);
        assert!(c.contains(&json!("1"), Comparison::Loose));
        assert!(!c.contains(&json!("1"), Comparison::Strict));
        assert!(c.contains(&json!(1), Comparison::Strict));
        assert!(c.contains(&json!(false), Comparison::default()));
        assert!(!c.contains(&json!(3), Comparison::Loose));
    }

    #[test]
    fn test_query_search_returns_first_key() {
        let c = Collection::make(vec![("a", json!(2)), ("b", json!("2")), ("c", json!(2))]);
        assert_eq!(c.search(&json!(2), Comparison::Loose), Some(Key::from("a")));
        assert_eq!(c.search(&json!("2"), Comparison::Strict), Some(Key::from("b")));
        assert_eq!(c.search(&json!(5), Comparison::Loose), None);
        assert_eq!(c.search_by(|_, k| k == &Key::from("c")), Some(Key::from("c")));
    }

    #[test]
    fn test_query_predicates() {
        let c = Collection::from_values(vec![2, 4, 5]);
        assert!(c.contains_where(|v, _| *v == 5));
        assert!(!c.every(|v, _| v % 2 == 0));
        assert!(c.every(|v, _| *v > 0));
        assert!(Collection::<i32>::new().every(|_, _| false));
        assert_eq!(c.first_where(|v, _| *v > 3), Some(&4));
        assert_eq!(c.first_where(|v, _| *v > 9), None);
        assert_eq!(c.reduce(0, |acc, v, _| acc + v), 11);
        assert_eq!(
            c.reduce(String::new(), |acc, _, k| format!("{acc}{k}")),
            "012"
        );
    }

    #[test]
    fn test_query_where_op_keeps_keys() {
        let older = users().where_op("age", Operator::Gt, &json!(15));
        assert_eq!(older.pluck("name").to_vec(), vec![json!("ada"), json!("cy")]);
        assert_eq!(older.keys().to_vec(), vec![Key::Int(0), Key::Int(2)]);

        let young = users().where_op("age", "<=".parse().unwrap(), &json!(10));
        assert_eq!(young.pluck("name").to_vec(), vec![json!("bob"), json!("dee")]);
    }

    #[test]
    fn test_query_where_op_strict_operators() {
        let c = Collection::from_values(vec![json!({"n": 10}), json!({"n": "10"})]);
        assert_eq!(c.where_op("n", Operator::Eq, &json!(10)).len(), 2);
        assert_eq!(c.where_op("n", Operator::Identical, &json!(10)).len(), 1);
        assert_eq!(c.where_op("n", Operator::NotIdentical, &json!(10)).len(), 1);
        assert_eq!(c.where_op("n", Operator::Ne, &json!(10)).len(), 0);
    }

    #[test]
    fn test_query_where_eq() {
        let core = users().where_eq("team", &json!("core"));
        assert_eq!(core.len(), 2);
        assert!(core.has(0));
        assert!(core.has(2));
    }

    #[test]
    fn test_query_operator_parsing() {
        assert_eq!("==".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::Ne);
        assert_eq!("!==".parse::<Operator>().unwrap(), Operator::NotIdentical);
        assert_eq!(Operator::Ge.to_string(), ">=");
        match "~".parse::<Operator>() {
            Err(CollectionError::UnknownOperator(op)) => assert_eq!(op, "~"),
            other => panic!("expected an unknown operator error, got {other:?}"),
        }
    }

    #[test]
    fn test_query_implode() {
        let words = Collection::from_values(vec!["a", "b", "c"]);
        assert_eq!(words.implode(", ").unwrap(), "a, b, c");
        assert_eq!(Collection::from_values(vec![1, 2, 3]).implode("-").unwrap(), "1-2-3");
        assert_eq!(Collection::<i32>::new().implode(",").unwrap(), "");

        let scalars =
            Collection::from_values(vec![json!(null), json!(true), json!(1.5), json!("x")]);
        assert_eq!(scalars.implode("|").unwrap(), "|1|1.5|x");
    }

    #[test]
    fn test_query_implode_rejects_nested_values() {
        let c = Collection::from_values(vec![json!("a"), json!({"b": 1})]);
        let err = c.implode(",").unwrap_err();
        assert!(matches!(err, CollectionError::NotStringable(Key::Int(1))));
    }

    #[test]
    fn test_query_implode_field() {
        assert_eq!(users().implode_field("name", ", ").unwrap(), "ada, bob, cy, dee");
        assert_eq!(users().implode_field("age", "+").unwrap(), "30+10+20");
    }

    #[test]
    fn test_query_sum_and_avg() {
        let c = Collection::from_values(vec![json!(1), json!("2"), json!("x"), json!(3.5)]);
        assert_eq!(c.sum(), 6.5);
        assert_eq!(Collection::from_values(vec![1, 2, 3, 4]).avg(), Some(2.5));
        assert_eq!(Collection::<i32>::new().avg(), None);
        assert_eq!(Collection::<i32>::new().sum(), 0.0);
        assert_eq!(users().pluck("age").sum(), 60.0);
    }

    #[test]
    fn test_query_min_and_max() {
        let c = Collection::from_values(vec![3, 1, 2]);
        assert_eq!(c.min(), Some(&1));
        assert_eq!(c.max(), Some(&3));
        assert_eq!(Collection::<i32>::new().min(), None);

        let tied = Collection::from_values(vec![json!(1), json!("1")]);
        assert_eq!(tied.min(), Some(&json!(1)));
        assert_eq!(tied.max(), Some(&json!(1)));
    }
}
