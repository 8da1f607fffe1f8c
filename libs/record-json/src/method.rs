use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::error::InvokeError;
use crate::property::{FromValue, ToValue};
use crate::value::Value;

pub type GetFn<R> = Arc<dyn Fn(&R) -> Result<Value, InvokeError> + Send + Sync>;
pub type SetFn<R> = Arc<dyn Fn(&mut R, Value) -> Result<(), InvokeError> + Send + Sync>;

/// How a method takes `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Associated function, no `self`.
    Static,
    Ref,
    Mut,
    /// `self` by value (or `Box<Self>`, `Rc<Self>`, ...).
    Owned,
}

/// Declared type of a single-parameter method's argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamType {
    pub id: TypeId,
    pub name: &'static str,
}

impl ParamType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

/// Invocation handle for an enumerated method.
pub enum Call<R> {
    Get(GetFn<R>),
    Set(SetFn<R>),
    /// Enumerated but not callable through a JSON value.
    Opaque,
}

impl<R> Clone for Call<R> {
    fn clone(&self) -> Self {
        match self {
            Call::Get(f) => Call::Get(Arc::clone(f)),
            Call::Set(f) => Call::Set(Arc::clone(f)),
            Call::Opaque => Call::Opaque,
        }
    }
}

/// One public method of a record type, as enumerated by `#[record]` or
/// registered by hand.
pub struct MethodInfo<R> {
    pub name: &'static str,
    pub receiver: Receiver,
    /// Parameter count, not counting the receiver.
    pub arity: usize,
    /// Whether the method returns something other than `()`.
    pub returns: bool,
    /// Set for methods taking exactly one owned parameter.
    pub param: Option<ParamType>,
    pub call: Call<R>,
}

impl<R> Clone for MethodInfo<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            receiver: self.receiver,
            arity: self.arity,
            returns: self.returns,
            param: self.param,
            call: self.call.clone(),
        }
    }
}

impl<R> fmt::Debug for MethodInfo<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let call = match self.call {
            Call::Get(_) => "get",
            Call::Set(_) => "set",
            Call::Opaque => "opaque",
        };
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("arity", &self.arity)
            .field("returns", &self.returns)
            .field("param", &self.param.map(|p| p.name))
            .field("call", &call)
            .finish()
    }
}

impl<R: 'static> MethodInfo<R> {
    /// `fn name(&self) -> T`
    pub fn getter<T, F>(name: &'static str, f: F) -> Self
    where
        T: ToValue,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        Self::fallible_getter(name, move |r: &R| Ok::<T, InvokeError>(f(r)))
    }

    /// `fn name(&self) -> Result<T, E>`
    pub fn fallible_getter<T, E, F>(name: &'static str, f: F) -> Self
    where
        T: ToValue,
        E: fmt::Display,
        F: Fn(&R) -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            name,
            receiver: Receiver::Ref,
            arity: 0,
            returns: true,
            param: None,
            call: Call::Get(Arc::new(move |r: &R| {
                f(r).map(|v| v.to_value()).map_err(InvokeError::failed)
            })),
        }
    }

    /// `fn name(&mut self, value: T)`; any return value is discarded.
    pub fn setter<T, F>(name: &'static str, f: F) -> Self
    where
        T: FromValue + 'static,
        F: Fn(&mut R, T) + Send + Sync + 'static,
    {
        Self::fallible_setter(name, move |r: &mut R, v: T| {
            f(r, v);
            Ok::<(), InvokeError>(())
        })
    }

    /// `fn name(&mut self, value: T) -> Result<_, E>`
    pub fn fallible_setter<T, U, E, F>(name: &'static str, f: F) -> Self
    where
        T: FromValue + 'static,
        E: fmt::Display,
        F: Fn(&mut R, T) -> Result<U, E> + Send + Sync + 'static,
    {
        Self {
            name,
            receiver: Receiver::Mut,
            arity: 1,
            returns: false,
            param: Some(ParamType::of::<T>()),
            call: Call::Set(Arc::new(move |r: &mut R, value: Value| {
                let arg = T::from_value(value)?;
                f(r, arg).map(|_| ()).map_err(InvokeError::failed)
            })),
        }
    }

    /// A method that is listed but cannot be called with JSON values.
    pub fn opaque(name: &'static str, receiver: Receiver, arity: usize, returns: bool) -> Self {
        Self {
            name,
            receiver,
            arity,
            returns,
            param: None,
            call: Call::Opaque,
        }
    }

    /// Re-targets a method of an embedded ancestor `R` onto `D`.
    pub fn project<D: 'static>(
        self,
        get: fn(&D) -> &R,
        get_mut: fn(&mut D) -> &mut R,
    ) -> MethodInfo<D> {
        let call = match self.call {
            Call::Get(f) => Call::Get(Arc::new(move |d: &D| f(get(d))) as GetFn<D>),
            Call::Set(f) => {
                Call::Set(Arc::new(move |d: &mut D, v: Value| f(get_mut(d), v)) as SetFn<D>)
            }
            Call::Opaque => Call::Opaque,
        };
        MethodInfo {
            name: self.name,
            receiver: self.receiver,
            arity: self.arity,
            returns: self.returns,
            param: self.param,
            call,
        }
    }
}

/// Ordered list of the public methods of `R`.
///
/// Method names are unique: pushing a method whose name is already present
/// replaces the earlier entry, so methods declared on `R` override those
/// inherited from an ancestor.
pub struct MethodTable<R> {
    methods: Vec<MethodInfo<R>>,
}

impl<R> Default for MethodTable<R> {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
        }
    }
}

impl<R: 'static> MethodTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, method: MethodInfo<R>) {
        if let Some(slot) = self.methods.iter_mut().find(|m| m.name == method.name) {
            *slot = method;
        } else {
            self.methods.push(method);
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, method: MethodInfo<R>) -> Self {
        self.push(method);
        self
    }

    /// Adds every method of the ancestor `A`, reached through a field of `R`.
    pub fn inherit<A: 'static>(
        &mut self,
        ancestor: MethodTable<A>,
        get: fn(&R) -> &A,
        get_mut: fn(&mut R) -> &mut A,
    ) {
        for method in ancestor.methods {
            self.push(method.project(get, get_mut));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodInfo<R>> {
        self.methods.iter()
    }

    pub fn get(&self, name: &str) -> Option<&MethodInfo<R>> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<R> IntoIterator for MethodTable<R> {
    type Item = MethodInfo<R>;
    type IntoIter = std::vec::IntoIter<MethodInfo<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_iter()
    }
}
