mod bytes;
mod decode;
mod encode;
mod error;
mod record;
mod request;
mod scalar;
mod tag;
mod value;

/// Bounded byte cursor with tag lookahead.
pub use bytes::Cursor;
/// Decoder entry points and options.
pub use decode::{DecodeOptions, decode_slice, decode_value};
/// Encoder entry points.
pub use encode::{encode_record, encode_to_vec, encode_value};
/// Error and result aliases.
pub use error::{PackError, Result};
/// Structured-record descriptor tables and helpers.
pub use record::{FieldSpec, Record, RecordSpec, RecordType, optional_fields_are_trailing, present_field_values};
/// Request linearization and the shipped request catalog.
pub use request::{
	AuthLoginRequest, AuthLogoutRequest, ConsoleCreateRequest, ConsoleDestroyRequest, ConsoleReadRequest,
	ConsoleWriteRequest, ModuleExecuteRequest, RpcRequest, encode_request, encode_request_to_vec, linearize,
};
/// Tag byte classification.
pub use tag::{Category, classify};
/// Dynamic wire value domain.
pub use value::WireValue;
