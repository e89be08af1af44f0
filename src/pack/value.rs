use std::fmt;

use crate::pack::record::Record;

/// Dynamically-typed wire value.
///
/// Decoding always yields owned `WireValue<'static>` trees; the [`Record`]
/// variant only arises on the encode path, borrowing the record for the
/// duration of one encode call. Integer decoding collapses widths: any wire
/// integer representable as `i64` becomes [`I64`](WireValue::I64), and
/// [`U64`](WireValue::U64) carries only unsigned values above `i64::MAX`.
#[derive(Clone)]
pub enum WireValue<'a> {
	/// Nil.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer, any wire width.
	I64(i64),
	/// Unsigned integer above `i64::MAX`.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// UTF-8 string.
	Str(Box<str>),
	/// Raw byte sequence, never coerced to text.
	Bytes(Vec<u8>),
	/// Ordered sequence; element order is significant and preserved exactly.
	Seq(Vec<WireValue<'a>>),
	/// Key-value mapping. Association is preserved; iteration order is the
	/// in-memory pair order (insertion order after decode) and is not a wire
	/// guarantee.
	Map(Vec<(WireValue<'a>, WireValue<'a>)>),
	/// A single isolated key-value pair; encodes as a one-pair map.
	Entry(Box<(WireValue<'a>, WireValue<'a>)>),
	/// Borrowed handle to a registered structured record.
	Record(&'a dyn Record),
}

impl WireValue<'_> {
	/// Short lowercase label for the value's runtime category.
	pub fn kind(&self) -> &'static str {
		match self {
			WireValue::Null => "null",
			WireValue::Bool(_) => "bool",
			WireValue::I64(_) => "int",
			WireValue::U64(_) => "uint",
			WireValue::F32(_) => "float32",
			WireValue::F64(_) => "float64",
			WireValue::Str(_) => "str",
			WireValue::Bytes(_) => "bytes",
			WireValue::Seq(_) => "seq",
			WireValue::Map(_) => "map",
			WireValue::Entry(_) => "entry",
			WireValue::Record(_) => "record",
		}
	}
}

/// Structural equality with numeric cross-variant integer comparison, so a
/// key decoded as `I64(5)` matches one built as `U64(5)`. Floats compare per
/// IEEE (`NaN != NaN`); record handles never compare equal.
impl PartialEq for WireValue<'_> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::I64(a), Self::I64(b)) => a == b,
			(Self::U64(a), Self::U64(b)) => a == b,
			(Self::I64(a), Self::U64(b)) | (Self::U64(b), Self::I64(a)) => *a >= 0 && *a as u64 == *b,
			(Self::F32(a), Self::F32(b)) => a == b,
			(Self::F64(a), Self::F64(b)) => a == b,
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::Seq(a), Self::Seq(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Entry(a), Self::Entry(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Debug for WireValue<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::I64(v) => f.debug_tuple("I64").field(v).finish(),
			Self::U64(v) => f.debug_tuple("U64").field(v).finish(),
			Self::F32(v) => f.debug_tuple("F32").field(v).finish(),
			Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
			Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
			Self::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
			Self::Seq(v) => f.debug_tuple("Seq").field(v).finish(),
			Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
			Self::Entry(v) => f.debug_tuple("Entry").field(v).finish(),
			Self::Record(record) => f.debug_tuple("Record").field(&record.record_name()).finish(),
		}
	}
}
