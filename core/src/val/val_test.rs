use std::collections::HashMap;

use crate::val::{Suggester, Val};

#[test]
fn from_scalars() {
    assert_eq!(Val::from(1i64), Val::Int(1));
    assert_eq!(Val::from(1i32), Val::Int(1));
    assert_eq!(Val::from(2.5f64), Val::Float(2.5));
    assert_eq!(Val::from(2.5f32), Val::Float(2.5));
    assert_eq!(Val::from(true), Val::Bool(true));
    assert_eq!(Val::from("s"), Val::Str("s".into()));
    assert_eq!(Val::from(String::from("s")), Val::Str("s".into()));
    assert_eq!(Val::from(None::<i64>), Val::Nil);
    assert_eq!(Val::from(Some(3)), Val::Int(3));
}

#[test]
fn display_formats() {
    assert_eq!(Val::Nil.to_string(), "nil");
    assert_eq!(Val::Bool(true).to_string(), "true");
    assert_eq!(Val::Int(42).to_string(), "42");
    assert_eq!(Val::Float(2.5).to_string(), "2.5");
    assert_eq!(Val::Str("abc".into()).to_string(), "abc");
    assert_eq!(Val::from(vec![1, 2]).to_string(), "[1, 2]");
}

#[test]
fn strict_int_conversions() {
    assert_eq!(i64::try_from(&Val::Int(3)).unwrap(), 3);
    assert_eq!(i64::try_from(&Val::Float(3.9)).unwrap(), 3);
    assert_eq!(i64::try_from(&Val::Bool(true)).unwrap(), 1);
    assert_eq!(i64::try_from(&Val::Str("42".into())).unwrap(), 42);
    assert!(i64::try_from(&Val::Str("abc".into())).is_err());
    assert!(i64::try_from(&Val::Nil).is_err());
}

#[test]
fn strict_float_conversions() {
    assert_eq!(f64::try_from(&Val::Int(3)).unwrap(), 3.0);
    assert_eq!(f64::try_from(&Val::Str("2.5".into())).unwrap(), 2.5);
    assert!(f64::try_from(&Val::Bool(true)).is_err());
}

#[test]
fn strict_bool_conversions() {
    assert!(bool::try_from(&Val::Str("Yes".into())).unwrap());
    assert!(!bool::try_from(&Val::Str("off".into())).unwrap());
    assert!(bool::try_from(&Val::Int(7)).unwrap());
    assert!(bool::try_from(&Val::Str("maybe".into())).is_err());
}

#[test]
fn strict_string_conversions() {
    assert_eq!(String::try_from(&Val::Int(1)).unwrap(), "1");
    assert_eq!(String::try_from(&Val::Float(2.5)).unwrap(), "2.5");
    assert_eq!(String::try_from(&Val::Bool(false)).unwrap(), "false");
    assert!(String::try_from(&Val::Nil).is_err());
}

#[test]
fn from_json_document() {
    let doc: serde_json::Value =
        serde_json::from_str(r#"{"a": 1, "b": [true, 2.5], "c": null}"#).unwrap();
    let val = Val::from(doc);
    let Val::Map(m) = val else {
        panic!("expected a map transport");
    };
    assert_eq!(m.get("a"), Some(&Val::Int(1)));
    assert_eq!(m.get("b"), Some(&Val::from(vec![Val::Bool(true), Val::Float(2.5)])));
    assert_eq!(m.get("c"), Some(&Val::Nil));
}

#[test]
fn from_yaml_document() {
    let doc: serde_yaml::Value = serde_yaml::from_str("a: 1\nb: text\n").unwrap();
    let val = Val::from(doc);
    let Val::Map(m) = val else {
        panic!("expected a map transport");
    };
    assert_eq!(m.get("a"), Some(&Val::Int(1)));
    assert_eq!(m.get("b"), Some(&Val::Str("text".into())));
}

#[test]
fn from_toml_document() {
    let doc: toml::Value = toml::from_str("a = 1\nb = 0.5\n").unwrap();
    let val = Val::from(doc);
    let Val::Map(m) = val else {
        panic!("expected a map transport");
    };
    assert_eq!(m.get("a"), Some(&Val::Int(1)));
    assert_eq!(m.get("b"), Some(&Val::Float(0.5)));
}

#[test]
fn from_nested_hashmap() {
    let mut inner = HashMap::new();
    inner.insert("x", 1);
    let mut outer = HashMap::new();
    outer.insert("inner", inner);
    let val = Val::from(outer);
    let Val::Map(m) = val else {
        panic!("expected a map transport");
    };
    assert!(m.get("inner").unwrap().is_map());
}

#[test]
fn suggester_produces_on_demand() {
    let s = Suggester::new(|| Val::Int(7));
    assert_eq!(s.produce(), Val::Int(7));
    assert_eq!(Val::Suggest(s).produced(), Val::Int(7));
    assert_eq!(Val::Int(1).produced(), Val::Int(1));
}

#[test]
fn suggester_equality_is_identity() {
    let a = Suggester::new(|| Val::Int(1));
    let b = Suggester::new(|| Val::Int(1));
    assert_eq!(a.clone(), a);
    assert_ne!(Val::Suggest(a), Val::Suggest(b));
}
