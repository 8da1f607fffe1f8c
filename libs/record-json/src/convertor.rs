use std::any::Any;
use std::collections::BTreeSet;
use std::marker::PhantomData;

use crate::discovery::{Accessors, Getter, Setter};
use crate::error::{ConvertError, InvokeError};
use crate::options::ConvertorOptions;
use crate::output::Output;
use crate::record::Record;
use crate::value::Map;

/// Type-erased convertor, as held by a codec's per-type registry.
pub trait Convertor: Send + Sync {
    /// Identity of the record type this convertor is bound to.
    fn type_name(&self) -> &'static str;

    fn to_json(&self, object: &dyn Any, out: &mut dyn Output) -> Result<ConversionReport, ConvertError>;

    fn from_json(&self, object: &Map) -> Result<Box<dyn Any>, ConvertError>;
}

/// Why a property was left out of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub property: String,
    pub error: InvokeError,
}

/// Per-property outcome of one `to_json` / `from_json` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Properties written to the sink or applied to the instance.
    pub converted: Vec<String>,
    /// Properties whose accessor or mutator failed.
    pub skipped: Vec<Skipped>,
    /// Input keys without a matching setter.
    pub ignored: Vec<String>,
}

impl ConversionReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Converts records of type `R` to and from JSON objects.
///
/// Accessors are discovered once in the constructor. The convertor holds no
/// mutable state afterwards, so one instance can be shared between threads.
pub struct PojoConvertor<R> {
    accessors: Accessors<R>,
    options: ConvertorOptions,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> PojoConvertor<R> {
    pub fn new() -> Result<Self, ConvertError> {
        Self::with_options(ConvertorOptions::default())
    }

    pub fn with_excluded<I, S>(excluded: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(ConvertorOptions::new().exclude(excluded))
    }

    /// Convertor whose write path is disabled.
    pub fn read_only() -> Result<Self, ConvertError> {
        Self::with_options(ConvertorOptions::new().from_json(false))
    }

    pub fn with_options(options: ConvertorOptions) -> Result<Self, ConvertError> {
        let accessors = Accessors::discover(R::type_name(), R::methods(), |name| {
            Self::include_field(&options, name)
        })?;
        Ok(Self {
            accessors,
            options,
            _record: PhantomData,
        })
    }

    fn include_field(options: &ConvertorOptions, name: &str) -> bool {
        !options.is_excluded(name)
    }

    pub fn excluded_count(&self) -> usize {
        self.options.excluded.len()
    }

    pub fn is_from_json_enabled(&self) -> bool {
        self.options.from_json
    }

    pub fn getters(&self) -> impl Iterator<Item = &Getter<R>> {
        self.accessors.getters()
    }

    pub fn getter(&self, property: &str) -> Option<&Getter<R>> {
        self.accessors.getter(property)
    }

    pub fn setter(&self, property: &str) -> Option<&Setter<R>> {
        self.accessors.setter(property)
    }

    /// Writable property names, sorted.
    pub fn setter_names(&self) -> BTreeSet<&str> {
        self.accessors.setter_names()
    }

    pub fn getter_count(&self) -> usize {
        self.accessors.getter_count()
    }

    pub fn setter_count(&self) -> usize {
        self.accessors.setter_count()
    }

    /// Writes the type tag and every readable property of `record`.
    ///
    /// A failing getter is logged and skipped; the remaining properties are
    /// still written.
    pub fn to_json(&self, record: &R, out: &mut dyn Output) -> ConversionReport {
        let mut report = ConversionReport::default();
        out.add_class(R::type_name());
        for getter in self.accessors.getters() {
            match getter.invoke(record) {
                Ok(value) => {
                    out.add(getter.property_name(), value);
                    report.converted.push(getter.property_name().to_string());
                }
                Err(e) => {
                    tracing::warn!(
                        record = R::type_name(),
                        property = getter.property_name(),
                        error = %e,
                        "property excluded (errors)"
                    );
                    report.skipped.push(Skipped {
                        property: getter.property_name().to_string(),
                        error: e,
                    });
                }
            }
        }
        report
    }

    /// Builds a new `R` from `object`.
    pub fn from_json(&self, object: &Map) -> Result<R, ConvertError> {
        self.from_json_with_report(object).map(|(record, _)| record)
    }

    /// Like [`from_json`](Self::from_json), also returning what was applied.
    ///
    /// Only a failure to instantiate `R` is fatal. Keys without a setter are
    /// ignored; a failing setter is logged and its property keeps the value
    /// the constructor gave it.
    pub fn from_json_with_report(&self, object: &Map) -> Result<(R, ConversionReport), ConvertError> {
        if !self.options.from_json {
            return Err(ConvertError::ReadOnly {
                record: R::type_name().to_string(),
            });
        }

        let mut record = R::instantiate()?;
        let mut report = ConversionReport::default();

        for (key, value) in object {
            let Some(setter) = self.accessors.setter(key) else {
                report.ignored.push(key.clone());
                continue;
            };
            match setter.invoke(&mut record, value.clone()) {
                Ok(()) => report.converted.push(key.clone()),
                Err(e) => {
                    tracing::warn!(
                        record = R::type_name(),
                        property = setter.property_name(),
                        error = %e,
                        "property not set (errors)"
                    );
                    report.skipped.push(Skipped {
                        property: key.clone(),
                        error: e,
                    });
                }
            }
        }

        Ok((record, report))
    }
}

impl<R: Record> Convertor for PojoConvertor<R> {
    fn type_name(&self) -> &'static str {
        R::type_name()
    }

    fn to_json(&self, object: &dyn Any, out: &mut dyn Output) -> Result<ConversionReport, ConvertError> {
        let record = object
            .downcast_ref::<R>()
            .ok_or_else(|| ConvertError::TypeMismatch {
                expected: R::type_name().to_string(),
            })?;
        Ok(PojoConvertor::to_json(self, record, out))
    }

    fn from_json(&self, object: &Map) -> Result<Box<dyn Any>, ConvertError> {
        PojoConvertor::from_json(self, object).map(|r| Box::new(r) as Box<dyn Any>)
    }
}
