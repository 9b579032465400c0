//! Dot-path helpers for nested translation maps.
//!
//! Grouped catalogs store keys as nested arrays; the rest of the pipeline works
//! with flat dot-paths (`nested.child`). These helpers convert between the two
//! and remove a path without mutating the input.

use serde_json::Value;

use crate::core::data::Translations;

/// Flatten nested maps into `(dot.path, leaf)` pairs, in file order.
///
/// Empty maps are leaves: `{"a": {}}` yields `("a", {})`.
pub fn flatten(translations: &Translations) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into(translations, "", &mut out);
    out
}

fn flatten_into(map: &Translations, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(child) if !child.is_empty() => flatten_into(child, &path, out),
            leaf => out.push((path, leaf.clone())),
        }
    }
}

/// Rebuild nested maps from dot-path pairs. Inverse of [`flatten`].
pub fn unflatten(pairs: impl IntoIterator<Item = (String, Value)>) -> Translations {
    let mut root = Translations::new();

    for (path, value) in pairs {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            continue;
        };

        let mut current = &mut root;
        for segment in segments {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Translations::new()));
            if !slot.is_object() {
                *slot = Value::Object(Translations::new());
            }
            let Value::Object(child) = slot else {
                unreachable!("slot was just made an object");
            };
            current = child;
        }
        current.insert(leaf.to_string(), value);
    }

    root
}

/// Copy of `translations` with `path` removed.
///
/// Branches emptied by the removal are dropped as well, all the way up.
/// Returns `None` when the path does not exist.
pub fn without_path(translations: &Translations, path: &str) -> Option<Translations> {
    if translations.contains_key(path) {
        let mut out = translations.clone();
        out.shift_remove(path);
        return Some(out);
    }

    let (head, rest) = path.split_once('.')?;
    let Some(Value::Object(child)) = translations.get(head) else {
        return None;
    };
    let pruned = without_path(child, rest)?;

    let mut out = translations.clone();
    if pruned.is_empty() {
        out.shift_remove(head);
    } else {
        out.insert(head.to_string(), Value::Object(pruned));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use crate::core::loaders::nested::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Translations {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_flatten_nested() {
        let translations = map(json!({
            "welcome": "Welcome",
            "nested": {"child": "value", "deeper": {"leaf": 1}}
        }));

        assert_eq!(
            flatten(&translations),
            vec![
                ("welcome".to_string(), json!("Welcome")),
                ("nested.child".to_string(), json!("value")),
                ("nested.deeper.leaf".to_string(), json!(1)),
            ]
        );
    }

    #[test]
    fn test_flatten_empty_map_is_leaf() {
        let translations = map(json!({"empty": {}, "x": null}));
        assert_eq!(
            flatten(&translations),
            vec![
                ("empty".to_string(), json!({})),
                ("x".to_string(), Value::Null),
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            json!({}),
            json!({"a": "1"}),
            json!({"a": {"b": {"c": "deep"}}, "d": true, "e": 2.5}),
            json!({"menu": {"home": "Home", "about": {"title": "About", "empty": {}}}, "n": null}),
        ];

        for case in cases {
            let original = map(case);
            let rebuilt = unflatten(flatten(&original));
            assert_eq!(Value::Object(rebuilt), Value::Object(original));
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let original = map(json!({"z": {"b": "1", "a": "2"}, "a": "3"}));
        let rebuilt = unflatten(flatten(&original));
        let outer: Vec<&String> = rebuilt.keys().collect();
        assert_eq!(outer, vec!["z", "a"]);
        let inner: Vec<&String> = rebuilt["z"].as_object().unwrap().keys().collect();
        assert_eq!(inner, vec!["b", "a"]);
    }

    #[test]
    fn test_unflatten_overwrites_scalar_with_branch() {
        let rebuilt = unflatten(vec![
            ("a".to_string(), json!("scalar")),
            ("a.b".to_string(), json!("nested")),
        ]);
        assert_eq!(Value::Object(rebuilt), json!({"a": {"b": "nested"}}));
    }

    #[test]
    fn test_without_path_leaf() {
        let translations = map(json!({"a": "1", "b": "2"}));
        let result = without_path(&translations, "a").unwrap();
        assert_eq!(Value::Object(result), json!({"b": "2"}));
        // input untouched
        assert_eq!(translations.len(), 2);
    }

    #[test]
    fn test_without_path_prunes_empty_branches() {
        let translations = map(json!({"a": {"b": {"c": "deep"}}, "keep": "x"}));
        let result = without_path(&translations, "a.b.c").unwrap();
        assert_eq!(Value::Object(result), json!({"keep": "x"}));
    }

    #[test]
    fn test_without_path_keeps_siblings() {
        let translations = map(json!({"a": {"b": "1", "c": "2"}}));
        let result = without_path(&translations, "a.b").unwrap();
        assert_eq!(Value::Object(result), json!({"a": {"c": "2"}}));
    }

    #[test]
    fn test_without_path_to_empty() {
        let translations = map(json!({"nested": {"child": "value"}}));
        let result = without_path(&translations, "nested.child").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_without_path_keeps_unrelated_empty_maps() {
        let translations = map(json!({"a": {"b": "1"}, "empty": {}}));
        let result = without_path(&translations, "a.b").unwrap();
        assert_eq!(Value::Object(result), json!({"empty": {}}));
    }

    #[test]
    fn test_without_path_missing() {
        let translations = map(json!({"a": {"b": "1"}}));
        assert_eq!(without_path(&translations, "a.c"), None);
        assert_eq!(without_path(&translations, "a.b.c"), None);
        assert_eq!(without_path(&translations, "x"), None);
    }

    #[test]
    fn test_without_path_preserves_order() {
        let translations = map(json!({"z": "1", "a": {"x": "2", "y": "3"}, "m": "4"}));
        let result = without_path(&translations, "a.x").unwrap();
        let keys: Vec<&String> = result.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
