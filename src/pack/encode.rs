//! Recursive dynamic-value encoder.
//!
//! Dispatch is an exhaustive match on the value's runtime category, so every
//! representable value has exactly one encode rule. Containers recurse;
//! structured records go through their field table, which calls back here for
//! each field value. Output goes straight to the sink with no buffering of
//! its own.

use std::io::Write;

use crate::pack::error::Result;
use crate::pack::record::{Record, present_field_values};
use crate::pack::scalar;
use crate::pack::value::WireValue;

/// Encodes one value to the sink.
///
/// Sequence elements are written in order. Map pairs are written in the
/// order the pair list holds them; no sorting is applied, so wire output is
/// deterministic only as far as the caller's pair order is.
pub fn encode_value<W: Write>(out: &mut W, value: &WireValue<'_>) -> Result<()> {
	match value {
		WireValue::Null => scalar::write_nil(out),
		WireValue::Bool(v) => scalar::write_bool(out, *v),
		WireValue::I64(v) => scalar::write_int(out, *v),
		WireValue::U64(v) => scalar::write_uint(out, *v),
		WireValue::F32(v) => scalar::write_f32(out, *v),
		WireValue::F64(v) => scalar::write_f64(out, *v),
		WireValue::Str(v) => scalar::write_str(out, v),
		WireValue::Bytes(v) => scalar::write_bin(out, v),
		WireValue::Seq(elems) => {
			scalar::write_array_head(out, elems.len())?;
			for elem in elems {
				encode_value(out, elem)?;
			}
			Ok(())
		}
		WireValue::Map(pairs) => {
			scalar::write_map_head(out, pairs.len())?;
			for (key, val) in pairs {
				encode_value(out, key)?;
				encode_value(out, val)?;
			}
			Ok(())
		}
		WireValue::Entry(pair) => {
			scalar::write_map_head(out, 1)?;
			encode_value(out, &pair.0)?;
			encode_value(out, &pair.1)
		}
		WireValue::Record(record) => encode_record(out, *record),
	}
}

/// Encodes a structured record as an array of its present field values, in
/// declaration order. Absent optional fields are dropped, not written as nil.
pub fn encode_record<W: Write>(out: &mut W, record: &dyn Record) -> Result<()> {
	let fields = present_field_values(record);
	scalar::write_array_head(out, fields.len())?;
	for field in &fields {
		encode_value(out, field)?;
	}
	Ok(())
}

/// Encodes one value into a fresh byte buffer.
pub fn encode_to_vec(value: &WireValue<'_>) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	encode_value(&mut out, value)?;
	Ok(out)
}
