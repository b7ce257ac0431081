use std::{collections::HashMap, sync::Arc};

use anyhow::{Result, anyhow};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::util::fast_map::{FastHashMap, fast_hash_map_with_capacity};

use super::{Suggester, Val};

impl From<String> for Val {
    #[inline]
    fn from(s: String) -> Self {
        Val::Str(Arc::<str>::from(s))
    }
}

impl From<&str> for Val {
    #[inline]
    fn from(s: &str) -> Self {
        Val::Str(Arc::from(s))
    }
}

impl From<i64> for Val {
    #[inline]
    fn from(i: i64) -> Self {
        Val::Int(i)
    }
}

impl From<i32> for Val {
    #[inline]
    fn from(i: i32) -> Self {
        Val::Int(i as i64)
    }
}

impl From<usize> for Val {
    #[inline]
    fn from(i: usize) -> Self {
        Val::Int(i as i64)
    }
}

impl From<f64> for Val {
    #[inline]
    fn from(f: f64) -> Self {
        Val::Float(f)
    }
}

impl From<f32> for Val {
    #[inline]
    fn from(f: f32) -> Self {
        Val::Float(f as f64)
    }
}

impl From<bool> for Val {
    #[inline]
    fn from(b: bool) -> Self {
        Val::Bool(b)
    }
}

impl From<Suggester> for Val {
    #[inline]
    fn from(s: Suggester) -> Self {
        Val::Suggest(s)
    }
}

impl<V, S, H> From<HashMap<S, V, H>> for Val
where
    V: Into<Val>,
    S: AsRef<str>,
    H: core::hash::BuildHasher,
{
    fn from(m: HashMap<S, V, H>) -> Self {
        let mut inner: FastHashMap<Arc<str>, Val> = fast_hash_map_with_capacity(m.len());
        for (k, v) in m.into_iter() {
            inner.insert(Arc::from(k.as_ref()), v.into());
        }
        Val::Map(Arc::new(inner))
    }
}

impl<T> From<Vec<T>> for Val
where
    T: Into<Val>,
{
    fn from(v: Vec<T>) -> Self {
        let v: Vec<Val> = v.into_iter().map(Into::into).collect();
        Val::List(Arc::<[Val]>::from(v))
    }
}

impl<T> From<Option<T>> for Val
where
    T: Into<Val>,
{
    fn from(o: Option<T>) -> Self {
        match o {
            Some(v) => v.into(),
            None => Val::Nil,
        }
    }
}

impl From<()> for Val {
    fn from(_: ()) -> Self {
        Val::Nil
    }
}

impl From<serde_json::Value> for Val {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::String(s) => Val::Str(Arc::<str>::from(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Val::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Val::Float(f)
                } else {
                    Val::Nil
                }
            }
            serde_json::Value::Bool(b) => Val::Bool(b),
            serde_json::Value::Array(a) => {
                let v: Vec<Val> = a.into_iter().map(Val::from).collect();
                Val::List(Arc::from(v))
            }
            serde_json::Value::Object(o) => {
                let m: FastHashMap<Arc<str>, Val> = o
                    .into_iter()
                    .map(|(k, v)| (Arc::<str>::from(k), Val::from(v)))
                    .collect();
                Val::Map(Arc::new(m))
            }
            serde_json::Value::Null => Val::Nil,
        }
    }
}

impl From<serde_yaml::Value> for Val {
    fn from(val: serde_yaml::Value) -> Self {
        match val {
            serde_yaml::Value::String(s) => Val::Str(Arc::<str>::from(s)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Val::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Val::Float(f)
                } else {
                    Val::Nil
                }
            }
            serde_yaml::Value::Bool(b) => Val::Bool(b),
            serde_yaml::Value::Sequence(a) => {
                let v: Vec<Val> = a.into_iter().map(Val::from).collect();
                Val::List(Arc::from(v))
            }
            serde_yaml::Value::Mapping(o) => {
                let m: FastHashMap<Arc<str>, Val> = o
                    .into_iter()
                    .filter_map(|(k, v)| {
                        if let serde_yaml::Value::String(key) = k {
                            Some((Arc::<str>::from(key), Val::from(v)))
                        } else {
                            None
                        }
                    })
                    .collect();
                Val::Map(Arc::new(m))
            }
            serde_yaml::Value::Null => Val::Nil,
            serde_yaml::Value::Tagged(tagged) => Val::from(tagged.value),
        }
    }
}

impl From<toml::Value> for Val {
    fn from(val: toml::Value) -> Self {
        match val {
            toml::Value::String(s) => Val::Str(Arc::<str>::from(s)),
            toml::Value::Integer(i) => Val::Int(i),
            toml::Value::Float(f) => Val::Float(f),
            toml::Value::Boolean(b) => Val::Bool(b),
            toml::Value::Datetime(d) => Val::Str(Arc::<str>::from(d.to_string())),
            toml::Value::Array(a) => {
                let v: Vec<Val> = a.into_iter().map(Val::from).collect();
                Val::List(Arc::from(v))
            }
            toml::Value::Table(t) => {
                let m: FastHashMap<Arc<str>, Val> = t
                    .into_iter()
                    .map(|(k, v)| (Arc::<str>::from(k), Val::from(v)))
                    .collect();
                Val::Map(Arc::new(m))
            }
        }
    }
}

// Suggesters and nil both serialize as unit; exporters see unresolved
// producers as explicit nulls rather than invoking them.
impl Serialize for Val {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Val::Nil | Val::Suggest(_) => serializer.serialize_unit(),
            Val::Bool(b) => serializer.serialize_bool(*b),
            Val::Int(i) => serializer.serialize_i64(*i),
            Val::Float(f) => serializer.serialize_f64(*f),
            Val::Str(s) => serializer.serialize_str(s),
            Val::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Val::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m.iter() {
                    map.serialize_entry(k.as_ref(), v)?;
                }
                map.end()
            }
        }
    }
}

impl TryFrom<&Val> for i64 {
    type Error = anyhow::Error;

    fn try_from(value: &Val) -> Result<Self> {
        match value {
            Val::Int(v) => Ok(*v),
            Val::Float(v) => Ok(*v as i64),
            Val::Bool(v) => Ok(*v as i64),
            Val::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("cannot convert `{s}` into int")),
            other => Err(anyhow!("cannot convert {} into int", other.type_name())),
        }
    }
}

impl TryFrom<&Val> for f64 {
    type Error = anyhow::Error;

    fn try_from(value: &Val) -> Result<Self> {
        match value {
            Val::Int(v) => Ok(*v as f64),
            Val::Float(v) => Ok(*v),
            Val::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| anyhow!("cannot convert `{s}` into float")),
            other => Err(anyhow!("cannot convert {} into float", other.type_name())),
        }
    }
}

impl TryFrom<&Val> for bool {
    type Error = anyhow::Error;

    fn try_from(value: &Val) -> Result<Self> {
        match value {
            Val::Bool(v) => Ok(*v),
            Val::Int(v) => Ok(*v != 0),
            Val::Str(s) => super::coerce::str_to_bool(s)
                .ok_or_else(|| anyhow!("cannot convert `{s}` into bool")),
            other => Err(anyhow!("cannot convert {} into bool", other.type_name())),
        }
    }
}

impl TryFrom<&Val> for String {
    type Error = anyhow::Error;

    fn try_from(value: &Val) -> Result<Self> {
        match value {
            Val::Bool(_) | Val::Int(_) | Val::Float(_) | Val::Str(_) => Ok(value.to_string()),
            other => Err(anyhow!("cannot convert {} into str", other.type_name())),
        }
    }
}

impl TryFrom<Val> for i64 {
    type Error = anyhow::Error;

    fn try_from(value: Val) -> Result<Self> {
        (&value).try_into()
    }
}

impl TryFrom<Val> for f64 {
    type Error = anyhow::Error;

    fn try_from(value: Val) -> Result<Self> {
        (&value).try_into()
    }
}

impl TryFrom<Val> for bool {
    type Error = anyhow::Error;

    fn try_from(value: Val) -> Result<Self> {
        (&value).try_into()
    }
}

impl TryFrom<Val> for String {
    type Error = anyhow::Error;

    fn try_from(value: Val) -> Result<Self> {
        (&value).try_into()
    }
}
