use std::collections::BTreeMap;

use crate::error::InvokeError;
use crate::number::NumberKind;
use crate::value::{Number, Value};

/// Read path: produces the JSON value of a getter's result.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Write path: extracts a setter argument from a JSON value.
///
/// Numeric impls are strict: `i32` accepts only `Number::Int`. Setter
/// arguments are brought to the right width by [`NumberKind`] before they
/// reach here; container impls do the same for each element.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, InvokeError>;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

macro_rules! number_property {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Number(Number::$variant(*self))
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, InvokeError> {
                match value {
                    Value::Number(Number::$variant(v)) => Ok(v),
                    other => Err(InvokeError::type_mismatch($name, other.type_name())),
                }
            }
        }
    };
}

number_property!(i16, Short, "number:short");
number_property!(i32, Int, "number:int");
number_property!(i64, Long, "number:long");
number_property!(f32, Float, "number:float");
number_property!(f64, Double, "number:double");

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(InvokeError::type_mismatch("bool", other.type_name())),
        }
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(InvokeError::type_mismatch("string", other.type_name())),
        }
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(InvokeError::failed(format!(
                        "expected single character, got {} characters",
                        s.chars().count()
                    ))),
                }
            }
            other => Err(InvokeError::type_mismatch("string", other.type_name())),
        }
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        Ok(value)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

/// Converts one container element, narrowing numbers to `T`'s width first.
fn element<T: FromValue + 'static>(value: Value) -> Result<T, InvokeError> {
    match (NumberKind::of::<T>(), value) {
        (Some(kind), Value::Number(n)) => T::from_value(Value::Number(kind.coerce(&n).into_owned())),
        (_, value) => T::from_value(value),
    }
}

impl<T: FromValue + 'static> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| element::<T>(item).map_err(|e| e.with_context(format!("[{i}]"))))
                .collect(),
            other => Err(InvokeError::type_mismatch("array", other.type_name())),
        }
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: FromValue + 'static> FromValue for BTreeMap<String, T> {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::Object(m) => m
                .into_iter()
                .map(|(k, v)| match element::<T>(v) {
                    Ok(v) => Ok((k, v)),
                    Err(e) => Err(e.with_context(format!("'{k}'"))),
                })
                .collect(),
            other => Err(InvokeError::type_mismatch("object", other.type_name())),
        }
    }
}
