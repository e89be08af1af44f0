use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors produced while decoding, encoding, and preparing MessagePack data.
///
/// Variants split into a decode-side group (malformed or truncated input),
/// an encode-side group (values the wire format cannot carry, sink failures),
/// and the recursion depth guard.
#[derive(Debug, Error)]
pub enum PackError {
	/// Output sink or filesystem IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading byte does not classify into any recognized wire category.
	#[error("unknown type tag 0x{tag:02x} at offset {at}")]
	UnknownTag {
		/// The offending tag byte.
		tag: u8,
		/// Byte offset where the tag was read.
		at: usize,
	},
	/// Tag byte classifies, but not into the category a read expected.
	#[error("expected {expected} tag, got 0x{tag:02x} at offset {at}")]
	TagMismatch {
		/// Category label the caller asked for.
		expected: &'static str,
		/// The tag byte actually present.
		tag: u8,
		/// Byte offset where the tag was read.
		at: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// String payload is not valid UTF-8.
	#[error("string payload at offset {at} is not valid utf-8")]
	InvalidUtf8 {
		/// Byte offset of the payload start.
		at: usize,
	},
	/// Decoder recursion depth exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthLimitExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A standalone buffer held undecoded bytes after one complete value.
	#[error("trailing bytes after value: {remaining} undecoded")]
	TrailingBytes {
		/// Unconsumed byte count.
		remaining: usize,
	},
	/// Value length exceeds what 32-bit wire length headers can carry.
	#[error("{kind} length {len} exceeds wire format maximum")]
	ValueTooLong {
		/// Wire category label.
		kind: &'static str,
		/// Offending length.
		len: usize,
	},
	/// CLI hex input contained a non-hex digit or a dangling nibble.
	#[error("invalid hex input at byte {at}")]
	InvalidHexInput {
		/// Offset of the offending character, or input length for odd-length input.
		at: usize,
	},
	/// CLI JSON input could not be parsed or mapped to a wire value.
	#[error("invalid json input: {detail}")]
	InvalidJsonInput {
		/// Human-readable description of the failure.
		detail: String,
	},
	/// Requested method is not in the request catalog.
	#[error("unknown method {method:?}")]
	UnknownMethod {
		/// The `group.method` name as given.
		method: String,
	},
	/// Wrong number of positional arguments for a catalog method.
	#[error("{method} takes {expected} argument(s), got {got}")]
	RequestArity {
		/// The `group.method` name.
		method: &'static str,
		/// Required positional argument count.
		expected: usize,
		/// Arguments actually supplied.
		got: usize,
	},
	/// Datastore option argument was not in `KEY=VALUE` form.
	#[error("option argument {arg:?} is not KEY=VALUE")]
	BadOptionArg {
		/// The argument as given.
		arg: String,
	},
}
