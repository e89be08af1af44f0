//! MessagePack type-tag constants and the wire category classifier.

// Single-byte tags.
/// Nil.
pub const NIL: u8 = 0xc0;
/// Reserved by the format, never valid on the wire.
pub const RESERVED: u8 = 0xc1;
/// Boolean false.
pub const FALSE: u8 = 0xc2;
/// Boolean true.
pub const TRUE: u8 = 0xc3;

// Raw byte sequences, length-prefixed.
/// Bin with 8-bit length.
pub const BIN8: u8 = 0xc4;
/// Bin with 16-bit length.
pub const BIN16: u8 = 0xc5;
/// Bin with 32-bit length.
pub const BIN32: u8 = 0xc6;

// Floats, IEEE 754 big-endian payload.
/// 32-bit float.
pub const FLOAT32: u8 = 0xca;
/// 64-bit float.
pub const FLOAT64: u8 = 0xcb;

// Integers beyond the fixint ranges.
/// Unsigned 8-bit integer.
pub const UINT8: u8 = 0xcc;
/// Unsigned 16-bit integer.
pub const UINT16: u8 = 0xcd;
/// Unsigned 32-bit integer.
pub const UINT32: u8 = 0xce;
/// Unsigned 64-bit integer.
pub const UINT64: u8 = 0xcf;
/// Signed 8-bit integer.
pub const INT8: u8 = 0xd0;
/// Signed 16-bit integer.
pub const INT16: u8 = 0xd1;
/// Signed 32-bit integer.
pub const INT32: u8 = 0xd2;
/// Signed 64-bit integer.
pub const INT64: u8 = 0xd3;

// Strings, UTF-8 payload.
/// Str with 8-bit length.
pub const STR8: u8 = 0xd9;
/// Str with 16-bit length.
pub const STR16: u8 = 0xda;
/// Str with 32-bit length.
pub const STR32: u8 = 0xdb;

// Containers beyond the fix ranges.
/// Array with 16-bit element count.
pub const ARRAY16: u8 = 0xdc;
/// Array with 32-bit element count.
pub const ARRAY32: u8 = 0xdd;
/// Map with 16-bit pair count.
pub const MAP16: u8 = 0xde;
/// Map with 32-bit pair count.
pub const MAP32: u8 = 0xdf;

// Fix-form bases embedding a length or value in the tag byte.
/// Fixmap base, 0x80–0x8f, low nibble = pair count.
pub const FIXMAP_BASE: u8 = 0x80;
/// Fixarray base, 0x90–0x9f, low nibble = element count.
pub const FIXARRAY_BASE: u8 = 0x90;
/// Fixstr base, 0xa0–0xbf, low 5 bits = byte length.
pub const FIXSTR_BASE: u8 = 0xa0;
/// Negative fixint base, 0xe0–0xff, the byte is the two's-complement value.
pub const NEGFIXINT_BASE: u8 = 0xe0;

/// Wire category of a leading tag byte.
///
/// Integer categories are named by payload width on the wire; each folds the
/// signed and unsigned tag of that width, and `Int8` additionally covers both
/// fixint ranges (the value is embedded in the tag byte itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	/// Nil.
	Nil,
	/// Boolean.
	Bool,
	/// Integer with an 8-bit payload, or a fixint.
	Int8,
	/// Integer with a 16-bit payload.
	Int16,
	/// Integer with a 32-bit payload.
	Int32,
	/// Integer with a 64-bit payload.
	Int64,
	/// 32-bit float.
	Float32,
	/// 64-bit float.
	Float64,
	/// UTF-8 string.
	Str,
	/// Raw byte sequence.
	Bin,
	/// Ordered sequence.
	Array,
	/// Key-value mapping.
	Map,
	/// No recognized category; decoding must fail.
	Unknown,
}

/// Classify a leading tag byte into its wire category.
///
/// Pure and total: every byte maps to exactly one category, with reserved and
/// extension-family tags mapping to [`Category::Unknown`].
pub fn classify(byte: u8) -> Category {
	match byte {
		0x00..=0x7f => Category::Int8,
		0x80..=0x8f => Category::Map,
		0x90..=0x9f => Category::Array,
		0xa0..=0xbf => Category::Str,
		NIL => Category::Nil,
		RESERVED => Category::Unknown,
		FALSE | TRUE => Category::Bool,
		BIN8 | BIN16 | BIN32 => Category::Bin,
		0xc7..=0xc9 => Category::Unknown,
		FLOAT32 => Category::Float32,
		FLOAT64 => Category::Float64,
		UINT8 => Category::Int8,
		UINT16 => Category::Int16,
		UINT32 => Category::Int32,
		UINT64 => Category::Int64,
		INT8 => Category::Int8,
		INT16 => Category::Int16,
		INT32 => Category::Int32,
		INT64 => Category::Int64,
		0xd4..=0xd8 => Category::Unknown,
		STR8 | STR16 | STR32 => Category::Str,
		ARRAY16 | ARRAY32 => Category::Array,
		MAP16 | MAP32 => Category::Map,
		0xe0..=0xff => Category::Int8,
	}
}
