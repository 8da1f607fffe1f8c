//! Bridge between [`Value`] and `serde_json`.
//!
//! Parsing follows the usual JSON codec convention: integers become
//! `Number::Long`, everything else numeric becomes `Number::Double`.

use crate::error::ConvertError;
use crate::value::{Map, Number, Value};

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(match n.as_i64() {
                Some(i) => Number::Long(i),
                // u64 above i64::MAX and fractions
                None => Number::Double(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                Value::Object(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => number_to_json(n),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(m) => serde_json::Value::Object(
                m.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON representation and become `null`.
fn number_to_json(n: Number) -> serde_json::Value {
    match n {
        Number::Short(v) => v.into(),
        Number::Int(v) => v.into(),
        Number::Long(v) => v.into(),
        Number::Float(v) => serde_json::Number::from_f64(widen_f32(v))
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Number::Double(v) => serde_json::Number::from_f64(v)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
    }
}

/// Widens through the shortest decimal form, so `0.1f32` is written as `0.1`
/// rather than `0.10000000149011612`.
fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::NAN)
}

/// Parses a JSON document into a value.
pub fn parse(text: &str) -> Result<Value, ConvertError> {
    let v: serde_json::Value = serde_json::from_str(text)?;
    Ok(v.into())
}

/// Parses a JSON document that must be an object.
pub fn parse_object(text: &str) -> Result<Map, ConvertError> {
    match parse(text)? {
        Value::Object(m) => Ok(m),
        other => Err(ConvertError::NotAnObject(other.type_name())),
    }
}

pub fn to_string(value: &Value) -> Result<String, ConvertError> {
    Ok(serde_json::to_string(&serde_json::Value::from(value.clone()))?)
}

pub fn to_string_pretty(value: &Value) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(&serde_json::Value::from(
        value.clone(),
    ))?)
}
