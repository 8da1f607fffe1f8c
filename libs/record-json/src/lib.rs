pub mod convertor;
pub mod discovery;
pub mod error;
pub mod json;
pub mod method;
pub mod number;
pub mod options;
pub mod output;
pub mod property;
pub mod record;
pub mod value;

pub use record_json_derive::record;

pub use convertor::{ConversionReport, Convertor, PojoConvertor, Skipped};
pub use error::{ConvertError, InvokeError};
pub use method::{Call, MethodInfo, MethodTable, ParamType, Receiver};
pub use number::NumberKind;
pub use options::ConvertorOptions;
pub use output::{ObjectOutput, Output};
pub use property::{FromValue, ToValue};
pub use record::Record;
pub use value::{Map, Number, Value};
