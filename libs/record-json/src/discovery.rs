use std::collections::{BTreeSet, HashMap};

use crate::error::{ConvertError, InvokeError};
use crate::method::{Call, GetFn, MethodTable, Receiver, SetFn};
use crate::number::NumberKind;
use crate::value::Value;

/// Derives the property name of an accessor or mutator.
///
/// Strips `prefix`, then one `_` separator if present, and lower-cases the
/// first remaining character. `None` when the name does not start with
/// `prefix` or nothing remains after it.
///
/// `get_first_name` → `first_name`, `getFirstName` → `firstName`.
pub fn property_name(method: &str, prefix: &str) -> Option<String> {
    let rest = method.strip_prefix(prefix)?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let mut chars = rest.chars();
    let first = chars.next()?;
    let mut name = String::with_capacity(rest.len());
    name.extend(first.to_lowercase());
    name.push_str(chars.as_str());
    Some(name)
}

/// Property getter name: `is` first, then `get`.
pub fn getter_name(method: &str) -> Option<String> {
    if method.starts_with("is") {
        property_name(method, "is")
    } else {
        property_name(method, "get")
    }
}

pub fn setter_name(method: &str) -> Option<String> {
    property_name(method, "set")
}

/// Registered read accessor.
pub struct Getter<R> {
    property: String,
    method: &'static str,
    call: GetFn<R>,
}

impl<R> Getter<R> {
    pub fn property_name(&self) -> &str {
        &self.property
    }

    pub fn method_name(&self) -> &'static str {
        self.method
    }

    pub fn invoke(&self, record: &R) -> Result<Value, InvokeError> {
        (self.call)(record)
    }
}

/// Registered mutator with its optional numeric coercion.
pub struct Setter<R> {
    property: String,
    method: &'static str,
    call: SetFn<R>,
    number_kind: Option<NumberKind>,
}

impl<R> Setter<R> {
    pub fn property_name(&self) -> &str {
        &self.property
    }

    pub fn method_name(&self) -> &'static str {
        self.method
    }

    pub fn number_kind(&self) -> Option<NumberKind> {
        self.number_kind
    }

    pub fn is_property_number(&self) -> bool {
        self.number_kind.is_some()
    }

    /// Applies `value`, narrowing numbers to the declared width first.
    pub fn invoke(&self, record: &mut R, value: Value) -> Result<(), InvokeError> {
        let value = match (self.number_kind, value) {
            (Some(kind), Value::Number(n)) => Value::Number(kind.coerce(&n).into_owned()),
            (_, value) => value,
        };
        (self.call)(record, value)
    }
}

/// Getter and setter tables of one record type.
///
/// Built once; never modified afterwards.
pub struct Accessors<R> {
    pub(crate) getters: Vec<Getter<R>>,
    pub(crate) setters: HashMap<String, Setter<R>>,
}

impl<R: 'static> Accessors<R> {
    /// Classifies every method of `methods`.
    ///
    /// `include` decides whether a derived property is kept.
    pub fn discover(
        record: &str,
        methods: MethodTable<R>,
        include: impl Fn(&str) -> bool,
    ) -> Result<Self, ConvertError> {
        let mut getters: Vec<Getter<R>> = Vec::new();
        let mut setters = HashMap::new();

        for method in methods {
            if matches!(method.receiver, Receiver::Static) {
                continue;
            }
            match method.arity {
                0 if method.returns => {
                    let Some(property) = getter_name(method.name) else {
                        continue;
                    };
                    if !include(&property) {
                        continue;
                    }
                    let Call::Get(call) = method.call else {
                        tracing::debug!(record, method = method.name, "getter is not invocable, skipping");
                        continue;
                    };
                    if getters.iter().any(|g| g.property == property) {
                        return Err(ConvertError::AmbiguousProperty {
                            record: record.to_string(),
                            property,
                        });
                    }
                    getters.push(Getter {
                        property,
                        method: method.name,
                        call,
                    });
                }
                1 => {
                    let Some(property) = setter_name(method.name) else {
                        continue;
                    };
                    if !include(&property) {
                        continue;
                    }
                    let Call::Set(call) = method.call else {
                        tracing::debug!(record, method = method.name, "setter is not invocable, skipping");
                        continue;
                    };
                    if setters.contains_key(&property) {
                        return Err(ConvertError::AmbiguousProperty {
                            record: record.to_string(),
                            property,
                        });
                    }
                    let number_kind = method.param.and_then(|p| NumberKind::for_type_id(p.id));
                    setters.insert(
                        property.clone(),
                        Setter {
                            property,
                            method: method.name,
                            call,
                            number_kind,
                        },
                    );
                }
                _ => {}
            }
        }

        tracing::debug!(
            record,
            getters = getters.len(),
            setters = setters.len(),
            "accessors discovered"
        );
        Ok(Self { getters, setters })
    }

    pub fn getters(&self) -> impl Iterator<Item = &Getter<R>> {
        self.getters.iter()
    }

    pub fn getter(&self, property: &str) -> Option<&Getter<R>> {
        self.getters.iter().find(|g| g.property == property)
    }

    pub fn setter(&self, property: &str) -> Option<&Setter<R>> {
        self.setters.get(property)
    }

    pub fn getter_count(&self) -> usize {
        self.getters.len()
    }

    pub fn setter_count(&self) -> usize {
        self.setters.len()
    }

    /// Names of all registered setters, sorted.
    pub fn setter_names(&self) -> BTreeSet<&str> {
        self.setters.keys().map(String::as_str).collect()
    }
}
