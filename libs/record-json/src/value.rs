use std::collections::BTreeMap;
use std::fmt;

/// JSON object: string keys → values.
pub type Map = BTreeMap<String, Value>;

/// Numeric value with its exact width preserved.
///
/// JSON has a single number type, but records declare fields of differing
/// widths. The parser bridge produces `Long` for integers and `Double` for
/// fractions; [`NumberKind`](crate::number::NumberKind) narrows them to what
/// a setter expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    pub fn as_i16(&self) -> i16 {
        match *self {
            Number::Short(v) => v,
            Number::Int(v) => v as i16,
            Number::Long(v) => v as i16,
            Number::Float(v) => v as i16,
            Number::Double(v) => v as i16,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match *self {
            Number::Short(v) => v as i32,
            Number::Int(v) => v,
            Number::Long(v) => v as i32,
            Number::Float(v) => v as i32,
            Number::Double(v) => v as i32,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Short(v) => v as i64,
            Number::Int(v) => v as i64,
            Number::Long(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        }
    }

    pub fn as_f32(&self) -> f32 {
        match *self {
            Number::Short(v) => v as f32,
            Number::Int(v) => v as f32,
            Number::Long(v) => v as f32,
            Number::Float(v) => v,
            Number::Double(v) => v as f32,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Short(v) => v as f64,
            Number::Int(v) => v as f64,
            Number::Long(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    /// Variant name, used in type mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Number::Short(_) => "short",
            Number::Int(_) => "int",
            Number::Long(_) => "long",
            Number::Float(_) => "float",
            Number::Double(_) => "double",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Short(v) => write!(f, "{v}"),
            Number::Int(v) => write!(f, "{v}"),
            Number::Long(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
            Number::Double(v) => write!(f, "{v}"),
        }
    }
}

/// Generic JSON value exchanged with the surrounding codec.
///
/// - Scalars: `Null`, `Bool`, `Number`, `String`
/// - Containers: `Array`, `Object` (recursive)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Short name of the JSON shape (`"number:long"`, `"string"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(Number::Short(_)) => "number:short",
            Value::Number(Number::Int(_)) => "number:int",
            Value::Number(Number::Long(_)) => "number:long",
            Value::Number(Number::Float(_)) => "number:float",
            Value::Number(Number::Double(_)) => "number:double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Field lookup on objects; `None` for every other shape.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Object(m)
    }
}
