//! Coercion of stored values toward the type of a caller-supplied default.
//!
//! Malformed input is never an error here: when a value cannot be coerced it
//! is returned unchanged, and only a bool-typed default substitutes itself
//! for unrecognized input. Strict conversions live in the `TryFrom` impls.

use super::Val;

const TRUE_WORDS: &[&str] = &["y", "yes", "t", "true", "on", "1"];
const FALSE_WORDS: &[&str] = &["n", "no", "f", "false", "off", "0"];

pub(crate) fn str_to_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if TRUE_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w)) {
        return Some(true);
    }
    if FALSE_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w)) {
        return Some(false);
    }
    None
}

/// Coerce `value` toward the runtime type of `default`.
///
/// A `Nil` default disables coercion entirely. Suggesters must be produced
/// before calling; a suggester reaching this function is treated as an
/// uncoercible value.
pub fn coerce_toward(value: Val, default: &Val) -> Val {
    match default {
        Val::Nil => value,
        Val::Bool(_) => match value {
            Val::Bool(_) => value,
            Val::Int(i) => Val::Bool(i != 0),
            Val::Str(ref s) => match str_to_bool(s) {
                Some(b) => Val::Bool(b),
                None => default.clone(),
            },
            _ => default.clone(),
        },
        Val::Int(_) => match value {
            Val::Int(_) => value,
            Val::Bool(b) => Val::Int(b as i64),
            Val::Float(f) => Val::Int(f as i64),
            Val::Str(ref s) => match s.trim().parse::<f64>() {
                // Widening is allowed: a fractional numeric string stays a float.
                Ok(f) if f.fract() == 0.0 => Val::Int(f as i64),
                Ok(f) => Val::Float(f),
                Err(_) => value,
            },
            _ => value,
        },
        Val::Float(_) => match value {
            Val::Float(_) => value,
            Val::Int(i) => Val::Float(i as f64),
            Val::Bool(b) => Val::Float(b as i64 as f64),
            Val::Str(ref s) => match s.trim().parse::<f64>() {
                Ok(f) => Val::Float(f),
                Err(_) => value,
            },
            _ => value,
        },
        Val::Str(_) => Val::Str(value.to_string().into()),
        _ => value,
    }
}
