// src/domain/coerce.rs
//
// Lenient field readers for the persisted document. Stored data comes from
// older builds and from the remote API, so numbers may arrive as strings,
// strings as numbers, and anything may be null.

use crate::workflow::Stage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Parse user or remote input as a number. Anything non-numeric is 0.
pub fn parse_number(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn number_from_value(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        _ => 0.0,
    }
}

pub fn string_from_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_from_value(&Value::deserialize(d)?))
}

pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(number_from_value(&Value::deserialize(d)?).trunc() as i64)
}

/// Millisecond timestamps. Missing or junk reads as 0.
pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    integer(d)
}

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(string_from_value(&Value::deserialize(d)?))
}

pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(truthy(&Value::deserialize(d)?))
}

/// `null` behaves like an absent field.
pub fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Unknown stage names detach the deal from the workflow instead of
/// failing the whole document.
pub fn stage<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Stage>, D::Error> {
    let raw = Option::<Value>::deserialize(d)?;
    Ok(match raw {
        Some(Value::String(s)) => Stage::parse(&s),
        _ => None,
    })
}

/// Anything other than an object reads as an empty checklist.
pub fn checklist<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(items) => items.into_iter().map(|(k, v)| (k, truthy(&v))).collect(),
        _ => BTreeMap::new(),
    })
}

/// A record list where one unreadable element is skipped, not fatal.
/// `null` or a non-array reads as empty.
pub fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(d)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(kind = value_kind(&other), "record list is not an array, ignoring it");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable stored record");
                None
            }
        })
        .collect())
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `{ "1": [true, null, false], ... }`. Holes in the arrays read as false,
/// keys that are not day numbers are dropped.
pub fn tasks<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<u8, Vec<bool>>, D::Error> {
    let raw = Option::<BTreeMap<String, Value>>::deserialize(d)?;
    let mut out = BTreeMap::new();
    for (key, value) in raw.unwrap_or_default() {
        let Ok(day) = key.trim().parse::<u8>() else {
            continue;
        };
        let slots = match value {
            Value::Array(items) => items.iter().map(truthy).collect(),
            _ => Vec::new(),
        };
        out.insert(day, slots);
    }
    Ok(out)
}
