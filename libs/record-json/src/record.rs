use crate::error::ConvertError;
use crate::method::MethodTable;

/// A type whose public methods can be enumerated.
///
/// Usually implemented by placing `#[record]` on an inherent `impl` block;
/// hand-written impls build the [`MethodTable`] directly.
pub trait Record: Sized + 'static {
    /// Type identity announced to the JSON sink.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// All public methods of the type and its ancestors.
    fn methods() -> MethodTable<Self>;

    /// Creates a fresh instance for the write path.
    ///
    /// Types without a no-argument constructor keep this default and can
    /// only be used with read-only convertors.
    fn instantiate() -> Result<Self, ConvertError> {
        Err(ConvertError::NotConstructible {
            record: Self::type_name().to_string(),
        })
    }
}
