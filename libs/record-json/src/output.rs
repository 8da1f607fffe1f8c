use crate::value::{Map, Value};

/// Key under which [`ObjectOutput`] stores the type identity.
pub const CLASS_KEY: &str = "class";

/// JSON sink fed by a convertor's read path.
///
/// Owned by the surrounding codec; the convertor only announces the record
/// type and then writes name/value pairs.
pub trait Output {
    /// Announces the record's type so the writer can embed a type tag.
    fn add_class(&mut self, type_name: &str);

    fn add(&mut self, name: &str, value: Value);
}

/// Collects the output into a JSON object.
#[derive(Debug, Clone, Default)]
pub struct ObjectOutput {
    map: Map,
}

impl ObjectOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_map(&self) -> &Map {
        &self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

impl Output for ObjectOutput {
    fn add_class(&mut self, type_name: &str) {
        self.map
            .insert(CLASS_KEY.to_string(), Value::String(type_name.to_string()));
    }

    fn add(&mut self, name: &str, value: Value) {
        self.map.insert(name.to_string(), value);
    }
}

/// Reads the type tag written by [`Output::add_class`] back from an object.
pub fn class_of(object: &Map) -> Option<&str> {
    object.get(CLASS_KEY).and_then(Value::as_str)
}
