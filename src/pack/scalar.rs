//! Primitive scalar codec: fixed-width byte layouts for every scalar
//! category, plus length-prefixed string/binary payloads and container
//! headers.
//!
//! Canonical minimal-size tag selection lives here. Each `write_*` picks the
//! smallest tag that can carry the value, so re-encoding a decoded value
//! reproduces the canonical byte sequence. Each `read_*` consumes the tag and
//! payload of exactly one value of the expected category and fails with
//! [`PackError::TagMismatch`] on anything else.

use std::io::Write;

use crate::pack::bytes::Cursor;
use crate::pack::error::{PackError, Result};
use crate::pack::tag;
use crate::pack::value::WireValue;

/// Reads a nil value.
pub fn read_nil(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	match cur.read_u8()? {
		tag::NIL => Ok(WireValue::Null),
		byte => Err(PackError::TagMismatch { expected: "nil", tag: byte, at }),
	}
}

/// Reads a boolean value.
pub fn read_bool(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	match cur.read_u8()? {
		tag::FALSE => Ok(WireValue::Bool(false)),
		tag::TRUE => Ok(WireValue::Bool(true)),
		byte => Err(PackError::TagMismatch { expected: "bool", tag: byte, at }),
	}
}

/// Reads an integer of any wire width.
///
/// Every value representable as `i64` collapses to [`WireValue::I64`];
/// a 64-bit unsigned value above `i64::MAX` stays [`WireValue::U64`].
pub fn read_int(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	let byte = cur.read_u8()?;
	match byte {
		0x00..=0x7f => Ok(WireValue::I64(i64::from(byte))),
		tag::NEGFIXINT_BASE..=0xff => Ok(WireValue::I64(i64::from(byte as i8))),
		tag::UINT8 => Ok(WireValue::I64(i64::from(cur.read_u8()?))),
		tag::UINT16 => Ok(WireValue::I64(i64::from(cur.read_u16_be()?))),
		tag::UINT32 => Ok(WireValue::I64(i64::from(cur.read_u32_be()?))),
		tag::UINT64 => {
			let raw = cur.read_u64_be()?;
			match i64::try_from(raw) {
				Ok(v) => Ok(WireValue::I64(v)),
				Err(_) => Ok(WireValue::U64(raw)),
			}
		}
		tag::INT8 => Ok(WireValue::I64(i64::from(cur.read_i8()?))),
		tag::INT16 => Ok(WireValue::I64(i64::from(cur.read_i16_be()?))),
		tag::INT32 => Ok(WireValue::I64(i64::from(cur.read_i32_be()?))),
		tag::INT64 => Ok(WireValue::I64(cur.read_i64_be()?)),
		_ => Err(PackError::TagMismatch { expected: "int", tag: byte, at }),
	}
}

/// Reads a 32-bit float.
pub fn read_f32(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	match cur.read_u8()? {
		tag::FLOAT32 => Ok(WireValue::F32(cur.read_f32_be()?)),
		byte => Err(PackError::TagMismatch { expected: "float32", tag: byte, at }),
	}
}

/// Reads a 64-bit float.
pub fn read_f64(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	match cur.read_u8()? {
		tag::FLOAT64 => Ok(WireValue::F64(cur.read_f64_be()?)),
		byte => Err(PackError::TagMismatch { expected: "float64", tag: byte, at }),
	}
}

/// Reads a UTF-8 string of any length form.
pub fn read_str(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	let byte = cur.read_u8()?;
	let len = match byte {
		tag::FIXSTR_BASE..=0xbf => usize::from(byte & 0x1f),
		tag::STR8 => usize::from(cur.read_u8()?),
		tag::STR16 => usize::from(cur.read_u16_be()?),
		tag::STR32 => cur.read_u32_be()? as usize,
		_ => return Err(PackError::TagMismatch { expected: "str", tag: byte, at }),
	};
	let payload_at = cur.pos();
	let payload = cur.read_exact(len)?;
	match std::str::from_utf8(payload) {
		Ok(text) => Ok(WireValue::Str(text.into())),
		Err(_) => Err(PackError::InvalidUtf8 { at: payload_at }),
	}
}

/// Reads a raw byte sequence. The payload stays binary and is never coerced
/// to text.
pub fn read_bin(cur: &mut Cursor<'_>) -> Result<WireValue<'static>> {
	let at = cur.pos();
	let byte = cur.read_u8()?;
	let len = match byte {
		tag::BIN8 => usize::from(cur.read_u8()?),
		tag::BIN16 => usize::from(cur.read_u16_be()?),
		tag::BIN32 => cur.read_u32_be()? as usize,
		_ => return Err(PackError::TagMismatch { expected: "bin", tag: byte, at }),
	};
	Ok(WireValue::Bytes(cur.read_exact(len)?.to_vec()))
}

/// Writes a nil tag.
pub fn write_nil<W: Write>(out: &mut W) -> Result<()> {
	out.write_all(&[tag::NIL])?;
	Ok(())
}

/// Writes a boolean tag.
pub fn write_bool<W: Write>(out: &mut W, v: bool) -> Result<()> {
	out.write_all(&[if v { tag::TRUE } else { tag::FALSE }])?;
	Ok(())
}

/// Writes a signed integer with the smallest tag that carries it.
pub fn write_int<W: Write>(out: &mut W, v: i64) -> Result<()> {
	if v >= 0 {
		return write_uint(out, v as u64);
	}
	if v >= -32 {
		out.write_all(&[v as i8 as u8])?;
	} else if v >= i64::from(i8::MIN) {
		out.write_all(&[tag::INT8, v as i8 as u8])?;
	} else if v >= i64::from(i16::MIN) {
		out.write_all(&[tag::INT16])?;
		out.write_all(&(v as i16).to_be_bytes())?;
	} else if v >= i64::from(i32::MIN) {
		out.write_all(&[tag::INT32])?;
		out.write_all(&(v as i32).to_be_bytes())?;
	} else {
		out.write_all(&[tag::INT64])?;
		out.write_all(&v.to_be_bytes())?;
	}
	Ok(())
}

/// Writes an unsigned integer with the smallest tag that carries it.
pub fn write_uint<W: Write>(out: &mut W, v: u64) -> Result<()> {
	if v < 0x80 {
		out.write_all(&[v as u8])?;
	} else if v <= u64::from(u8::MAX) {
		out.write_all(&[tag::UINT8, v as u8])?;
	} else if v <= u64::from(u16::MAX) {
		out.write_all(&[tag::UINT16])?;
		out.write_all(&(v as u16).to_be_bytes())?;
	} else if v <= u64::from(u32::MAX) {
		out.write_all(&[tag::UINT32])?;
		out.write_all(&(v as u32).to_be_bytes())?;
	} else {
		out.write_all(&[tag::UINT64])?;
		out.write_all(&v.to_be_bytes())?;
	}
	Ok(())
}

/// Writes a 32-bit float, bit-exact.
pub fn write_f32<W: Write>(out: &mut W, v: f32) -> Result<()> {
	out.write_all(&[tag::FLOAT32])?;
	out.write_all(&v.to_bits().to_be_bytes())?;
	Ok(())
}

/// Writes a 64-bit float, bit-exact.
pub fn write_f64<W: Write>(out: &mut W, v: f64) -> Result<()> {
	out.write_all(&[tag::FLOAT64])?;
	out.write_all(&v.to_bits().to_be_bytes())?;
	Ok(())
}

/// Writes a UTF-8 string with the smallest length form.
pub fn write_str<W: Write>(out: &mut W, v: &str) -> Result<()> {
	let len = v.len();
	if len < 32 {
		out.write_all(&[tag::FIXSTR_BASE | len as u8])?;
	} else if len <= usize::from(u8::MAX) {
		out.write_all(&[tag::STR8, len as u8])?;
	} else if len <= usize::from(u16::MAX) {
		out.write_all(&[tag::STR16])?;
		out.write_all(&(len as u16).to_be_bytes())?;
	} else if u32::try_from(len).is_ok() {
		out.write_all(&[tag::STR32])?;
		out.write_all(&(len as u32).to_be_bytes())?;
	} else {
		return Err(PackError::ValueTooLong { kind: "string", len });
	}
	out.write_all(v.as_bytes())?;
	Ok(())
}

/// Writes a raw byte sequence with the smallest length form.
pub fn write_bin<W: Write>(out: &mut W, v: &[u8]) -> Result<()> {
	let len = v.len();
	if len <= usize::from(u8::MAX) {
		out.write_all(&[tag::BIN8, len as u8])?;
	} else if len <= usize::from(u16::MAX) {
		out.write_all(&[tag::BIN16])?;
		out.write_all(&(len as u16).to_be_bytes())?;
	} else if u32::try_from(len).is_ok() {
		out.write_all(&[tag::BIN32])?;
		out.write_all(&(len as u32).to_be_bytes())?;
	} else {
		return Err(PackError::ValueTooLong { kind: "binary", len });
	}
	out.write_all(v)?;
	Ok(())
}

/// Writes an array header for `len` elements.
pub fn write_array_head<W: Write>(out: &mut W, len: usize) -> Result<()> {
	if len < 16 {
		out.write_all(&[tag::FIXARRAY_BASE | len as u8])?;
	} else if len <= usize::from(u16::MAX) {
		out.write_all(&[tag::ARRAY16])?;
		out.write_all(&(len as u16).to_be_bytes())?;
	} else if u32::try_from(len).is_ok() {
		out.write_all(&[tag::ARRAY32])?;
		out.write_all(&(len as u32).to_be_bytes())?;
	} else {
		return Err(PackError::ValueTooLong { kind: "array", len });
	}
	Ok(())
}

/// Writes a map header for `len` key-value pairs.
pub fn write_map_head<W: Write>(out: &mut W, len: usize) -> Result<()> {
	if len < 16 {
		out.write_all(&[tag::FIXMAP_BASE | len as u8])?;
	} else if len <= usize::from(u16::MAX) {
		out.write_all(&[tag::MAP16])?;
		out.write_all(&(len as u16).to_be_bytes())?;
	} else if u32::try_from(len).is_ok() {
		out.write_all(&[tag::MAP32])?;
		out.write_all(&(len as u32).to_be_bytes())?;
	} else {
		return Err(PackError::ValueTooLong { kind: "map", len });
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn int_bytes(v: i64) -> Vec<u8> {
		let mut out = Vec::new();
		write_int(&mut out, v).unwrap();
		out
	}

	#[test]
	fn integer_encoding_picks_smallest_form() {
		assert_eq!(int_bytes(5), [0x05]);
		assert_eq!(int_bytes(127), [0x7f]);
		assert_eq!(int_bytes(200), [tag::UINT8, 200]);
		assert_eq!(int_bytes(70_000), [tag::UINT32, 0x00, 0x01, 0x11, 0x70]);
		assert_eq!(int_bytes(-5), [0xfb]);
		assert_eq!(int_bytes(-32), [0xe0]);
		assert_eq!(int_bytes(-200), [tag::INT16, 0xff, 0x38]);
	}

	#[test]
	fn integers_round_trip_across_widths() {
		for v in [0i64, 1, 127, 128, 255, 256, 65_535, 65_536, i64::MAX, -1, -32, -33, -128, -129, -32_768, -32_769, i64::MIN] {
			let bytes = int_bytes(v);
			let mut cur = Cursor::new(&bytes);
			assert_eq!(read_int(&mut cur).unwrap(), WireValue::I64(v), "value {v}");
			assert_eq!(cur.remaining(), 0);
		}
	}

	#[test]
	fn large_unsigned_survives_as_unsigned() {
		let mut out = Vec::new();
		write_uint(&mut out, u64::MAX).unwrap();
		assert_eq!(out[0], tag::UINT64);
		let mut cur = Cursor::new(&out);
		assert_eq!(read_int(&mut cur).unwrap(), WireValue::U64(u64::MAX));
	}

	#[test]
	fn floats_round_trip_bit_for_bit() {
		for v in [0.0f64, -0.0, 1.5, f64::MIN_POSITIVE, f64::MAX] {
			let mut out = Vec::new();
			write_f64(&mut out, v).unwrap();
			let mut cur = Cursor::new(&out);
			match read_f64(&mut cur).unwrap() {
				WireValue::F64(back) => assert_eq!(back.to_bits(), v.to_bits()),
				other => panic!("expected f64, got {other:?}"),
			}
		}
		let mut out = Vec::new();
		write_f32(&mut out, 1.25f32).unwrap();
		assert_eq!(out, [tag::FLOAT32, 0x3f, 0xa0, 0x00, 0x00]);
	}

	#[test]
	fn string_length_forms_switch_at_boundaries() {
		let mut out = Vec::new();
		write_str(&mut out, &"a".repeat(31)).unwrap();
		assert_eq!(out[0], tag::FIXSTR_BASE | 31);

		out.clear();
		write_str(&mut out, &"a".repeat(32)).unwrap();
		assert_eq!(&out[..2], &[tag::STR8, 32]);

		out.clear();
		write_str(&mut out, &"a".repeat(256)).unwrap();
		assert_eq!(&out[..3], &[tag::STR16, 0x01, 0x00]);
	}

	#[test]
	fn strings_and_bytes_round_trip() {
		let mut out = Vec::new();
		write_str(&mut out, "hello").unwrap();
		let mut cur = Cursor::new(&out);
		assert_eq!(read_str(&mut cur).unwrap(), WireValue::Str("hello".into()));

		out.clear();
		write_bin(&mut out, &[0x00, 0xff, 0x7f]).unwrap();
		assert_eq!(&out[..2], &[tag::BIN8, 3]);
		let mut cur = Cursor::new(&out);
		assert_eq!(read_bin(&mut cur).unwrap(), WireValue::Bytes(vec![0x00, 0xff, 0x7f]));
	}

	#[test]
	fn wrong_tag_reports_expected_category() {
		let bytes = [tag::TRUE];
		let mut cur = Cursor::new(&bytes);
		match read_str(&mut cur) {
			Err(PackError::TagMismatch { expected: "str", tag: t, at: 0 }) => assert_eq!(t, tag::TRUE),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn invalid_utf8_is_rejected_with_payload_offset() {
		let bytes = [tag::FIXSTR_BASE | 2, 0xff, 0xfe];
		let mut cur = Cursor::new(&bytes);
		match read_str(&mut cur) {
			Err(PackError::InvalidUtf8 { at: 1 }) => {}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn container_headers_switch_at_boundaries() {
		let mut out = Vec::new();
		write_array_head(&mut out, 15).unwrap();
		assert_eq!(out, [tag::FIXARRAY_BASE | 15]);

		out.clear();
		write_array_head(&mut out, 16).unwrap();
		assert_eq!(out, [tag::ARRAY16, 0x00, 0x10]);

		out.clear();
		write_map_head(&mut out, 15).unwrap();
		assert_eq!(out, [tag::FIXMAP_BASE | 15]);

		out.clear();
		write_map_head(&mut out, 70_000).unwrap();
		assert_eq!(out, [tag::MAP32, 0x00, 0x01, 0x11, 0x70]);
	}
}
