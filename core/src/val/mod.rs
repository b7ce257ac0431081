use std::{fmt, sync::Arc};

use crate::util::fast_map::FastHashMap;

mod coerce;
mod convert;

#[cfg(test)]
mod val_test;

pub use coerce::coerce_toward;

/// A deferred zero-argument value producer.
///
/// Stored like any other value; the accessor invokes it transparently at
/// resolution time, so an external process (e.g. a tuning loop) can supply
/// values lazily without call sites knowing about it.
#[derive(Clone)]
pub struct Suggester(Arc<dyn Fn() -> Val + Send + Sync>);

impl Suggester {
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn() -> Val + Send + Sync + 'static,
    {
        Self(Arc::new(produce))
    }

    pub fn produce(&self) -> Val {
        (self.0)()
    }
}

// Producers are opaque; compare and print by identity only.
impl PartialEq for Suggester {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Suggester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Suggester(..)")
    }
}

/// Dynamic parameter value.
///
/// `Map` is a transport for nested overrides only: the key store flattens it
/// into dotted keys on write and never stores one.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<[Val]>),
    Map(Arc<FastHashMap<Arc<str>, Val>>),
    Suggest(Suggester),
}

impl Val {
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Nil => "nil",
            Val::Bool(_) => "bool",
            Val::Int(_) => "int",
            Val::Float(_) => "float",
            Val::Str(_) => "str",
            Val::List(_) => "list",
            Val::Map(_) => "map",
            Val::Suggest(_) => "suggester",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Val::Nil)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Val::Map(_))
    }

    /// Invoke a suggester one level; any other value passes through.
    pub fn produced(self) -> Val {
        match self {
            Val::Suggest(s) => s.produce(),
            other => other,
        }
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Nil => f.write_str("nil"),
            Val::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Val::Int(i) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*i))
            }
            Val::Float(x) => {
                let mut buf = ryu::Buffer::new();
                f.write_str(buf.format(*x))
            }
            Val::Str(s) => f.write_str(s),
            Val::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Val::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Val::Suggest(_) => f.write_str("<suggester>"),
        }
    }
}
