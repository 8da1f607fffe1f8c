use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::value::Number;

/// Coercion strategy for one numeric width.
///
/// Setters declare exact widths while JSON carries one number type, so a
/// value headed for a numeric setter is first narrowed (or widened) to the
/// declared width. Narrowing follows Rust `as` casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Short,
    Int,
    Long,
    Float,
    Double,
}

/// Process-wide lookup: declared parameter type → strategy.
///
/// Plain numeric types and their `Option` forms share a strategy, the same
/// way primitive and boxed forms do in a reflective runtime.
static NUMBER_KINDS: LazyLock<HashMap<TypeId, NumberKind>> = LazyLock::new(|| {
    HashMap::from([
        (TypeId::of::<i16>(), NumberKind::Short),
        (TypeId::of::<Option<i16>>(), NumberKind::Short),
        (TypeId::of::<i32>(), NumberKind::Int),
        (TypeId::of::<Option<i32>>(), NumberKind::Int),
        (TypeId::of::<i64>(), NumberKind::Long),
        (TypeId::of::<Option<i64>>(), NumberKind::Long),
        (TypeId::of::<f32>(), NumberKind::Float),
        (TypeId::of::<Option<f32>>(), NumberKind::Float),
        (TypeId::of::<f64>(), NumberKind::Double),
        (TypeId::of::<Option<f64>>(), NumberKind::Double),
    ])
});

impl NumberKind {
    /// Strategy registered for `type_id`, if it is a numeric type.
    pub fn for_type_id(type_id: TypeId) -> Option<NumberKind> {
        NUMBER_KINDS.get(&type_id).copied()
    }

    pub fn of<T: 'static>() -> Option<NumberKind> {
        Self::for_type_id(TypeId::of::<T>())
    }

    /// Converts `number` to this width.
    ///
    /// `Long` and `Double` hand back the input itself when it already has
    /// that exact width; every other case produces a new value.
    pub fn coerce<'a>(&self, number: &'a Number) -> Cow<'a, Number> {
        match self {
            NumberKind::Short => Cow::Owned(Number::Short(number.as_i16())),
            NumberKind::Int => Cow::Owned(Number::Int(number.as_i32())),
            NumberKind::Float => Cow::Owned(Number::Float(number.as_f32())),
            NumberKind::Long => match number {
                Number::Long(_) => Cow::Borrowed(number),
                other => Cow::Owned(Number::Long(other.as_i64())),
            },
            NumberKind::Double => match number {
                Number::Double(_) => Cow::Borrowed(number),
                other => Cow::Owned(Number::Double(other.as_f64())),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumberKind::Short => "short",
            NumberKind::Int => "int",
            NumberKind::Long => "long",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
        }
    }
}
