use std::collections::HashMap;

use crate::{
    store::{HashIndexed, KeyStore},
    util::fast_map::key_hash,
    val::Val,
};

#[test]
fn scalar_round_trip() {
    let mut store = KeyStore::new();
    store.put("int", 1);
    store.put("float", 2.0);
    store.put("str", "str");
    store.put("bool", true);
    store.put("nil", ());

    assert_eq!(store.get("int"), Some(&Val::Int(1)));
    assert_eq!(store.get("float"), Some(&Val::Float(2.0)));
    assert_eq!(store.get("str"), Some(&Val::Str("str".into())));
    assert_eq!(store.get("bool"), Some(&Val::Bool(true)));
    assert_eq!(store.get("nil"), Some(&Val::Nil));
    assert_eq!(store.get("missing"), None);
}

#[test]
fn list_round_trip() {
    let mut store = KeyStore::new();
    store.put("layers", vec![1, 2, 3]);
    assert_eq!(store.get("layers"), Some(&Val::from(vec![1, 2, 3])));
}

#[test]
fn nested_map_flattens_to_dotted_keys() {
    let mut nested = HashMap::new();
    nested.insert("b", Val::Int(1));
    let mut outer = HashMap::new();
    outer.insert("a", Val::from(nested));

    let mut store = KeyStore::new();
    store.update(Val::from(outer));

    assert_eq!(store.keys(), vec!["a.b".to_string()]);
    assert_eq!(store.get("a.b"), Some(&Val::Int(1)));
    // The parent key itself does not exist; only the flattened leaf does.
    assert_eq!(store.get("a"), None);
}

#[test]
fn no_stored_value_is_a_map() {
    let mut inner = HashMap::new();
    inner.insert("x", 1);
    inner.insert("y", 2);
    let mut store = KeyStore::new();
    store.put("p", Val::from(inner));

    for key in store.keys() {
        assert!(!store.get(&key).unwrap().is_map(), "map stored at {key}");
    }
    assert_eq!(store.get("p.x"), Some(&Val::Int(1)));
    assert_eq!(store.get("p.y"), Some(&Val::Int(2)));
}

#[test]
fn scalar_prefix_write_keeps_flattened_children() {
    let mut store = KeyStore::new();
    store.put("a.b", 1);
    store.put("a", 5);

    assert_eq!(store.get("a"), Some(&Val::Int(5)));
    assert_eq!(store.get("a.b"), Some(&Val::Int(1)));
}

#[test]
fn put_overwrites_exact_key_only() {
    let mut store = KeyStore::new();
    store.put("k", 1);
    store.put("k", "two");
    assert_eq!(store.get("k"), Some(&Val::Str("two".into())));
    assert_eq!(store.len(), 1);
}

#[test]
fn update_preserves_unrelated_keys() {
    let mut store = KeyStore::new();
    store.put("keep.me", 1);

    let mut overrides = HashMap::new();
    overrides.insert("new", 2);
    store.update(Val::from(overrides));

    assert_eq!(store.get("keep.me"), Some(&Val::Int(1)));
    assert_eq!(store.get("new"), Some(&Val::Int(2)));
}

#[test]
fn clear_removes_everything() {
    let mut store = KeyStore::new();
    store.put("a", 1);
    store.put("b.c", 2);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.lookup_by_hash(key_hash("a")), None);
}

#[test]
fn hash_lookup_matches_string_lookup() {
    let mut store = KeyStore::new();
    store.put("model.depth", 12);
    store.put("model.name", "resnet");

    for key in store.keys() {
        assert_eq!(store.lookup_by_hash(key_hash(&key)), store.get(&key));
    }
    assert_eq!(store.lookup_by_hash(key_hash("model.width")), None);
}

#[test]
fn merge_from_is_union() {
    let mut base = KeyStore::new();
    base.put("a", 1);
    base.put("b", 2);

    let mut other = KeyStore::new();
    other.put("b", 20);
    other.put("c", 30);

    base.merge_from(&other);
    assert_eq!(base.get("a"), Some(&Val::Int(1)));
    assert_eq!(base.get("b"), Some(&Val::Int(20)));
    assert_eq!(base.get("c"), Some(&Val::Int(30)));
}
