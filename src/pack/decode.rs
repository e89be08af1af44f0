//! Recursive dynamic-value decoder.
//!
//! Decoding peeks one tag byte, classifies it, and dispatches: scalars go to
//! the scalar codec, containers recurse. The whole call fails on the first
//! error; no partial tree is ever returned.

use crate::pack::bytes::Cursor;
use crate::pack::error::{PackError, Result};
use crate::pack::scalar;
use crate::pack::tag::{self, Category};
use crate::pack::value::WireValue;

/// Decode-time limits.
///
/// The default matches the historical behavior: nesting depth is unbounded.
/// Operators decoding untrusted input should set a depth limit, since
/// recursion depth tracks input nesting depth one-to-one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
	/// Maximum container nesting depth, `None` for unlimited. A value of
	/// `n` permits containers down to `n` levels below the top value.
	pub max_depth: Option<u32>,
}

/// Decodes one value from the cursor's current position.
///
/// The cursor is left on the first byte after the value, so consecutive
/// values can be decoded by repeated calls.
pub fn decode_value(cur: &mut Cursor<'_>, opts: &DecodeOptions) -> Result<WireValue<'static>> {
	decode_at_depth(cur, opts, 0)
}

/// Decodes a slice holding exactly one value.
///
/// Fails with [`PackError::TrailingBytes`] if any input remains after the
/// value.
pub fn decode_slice(bytes: &[u8], opts: &DecodeOptions) -> Result<WireValue<'static>> {
	let mut cur = Cursor::new(bytes);
	let value = decode_value(&mut cur, opts)?;
	if cur.remaining() > 0 {
		return Err(PackError::TrailingBytes { remaining: cur.remaining() });
	}
	Ok(value)
}

fn decode_at_depth(cur: &mut Cursor<'_>, opts: &DecodeOptions, depth: u32) -> Result<WireValue<'static>> {
	if let Some(max_depth) = opts.max_depth {
		if depth > max_depth {
			return Err(PackError::DepthLimitExceeded { max_depth });
		}
	}
	let at = cur.pos();
	let byte = cur.peek()?;
	match tag::classify(byte) {
		Category::Nil => scalar::read_nil(cur),
		Category::Bool => scalar::read_bool(cur),
		Category::Int8 | Category::Int16 | Category::Int32 | Category::Int64 => scalar::read_int(cur),
		Category::Float32 => scalar::read_f32(cur),
		Category::Float64 => scalar::read_f64(cur),
		Category::Str => scalar::read_str(cur),
		Category::Bin => scalar::read_bin(cur),
		Category::Array => decode_seq(cur, opts, depth),
		Category::Map => decode_map(cur, opts, depth),
		Category::Unknown => Err(PackError::UnknownTag { tag: byte, at }),
	}
}

fn decode_seq(cur: &mut Cursor<'_>, opts: &DecodeOptions, depth: u32) -> Result<WireValue<'static>> {
	let count = read_array_len(cur)?;
	// Every element occupies at least one byte, so a count beyond the
	// remaining input is malformed. Checked before allocating.
	if count > cur.remaining() {
		return Err(PackError::UnexpectedEof { at: cur.pos(), need: count, rem: cur.remaining() });
	}
	let mut elems = Vec::with_capacity(count);
	for _ in 0..count {
		elems.push(decode_at_depth(cur, opts, depth + 1)?);
	}
	Ok(WireValue::Seq(elems))
}

fn decode_map(cur: &mut Cursor<'_>, opts: &DecodeOptions, depth: u32) -> Result<WireValue<'static>> {
	let count = read_map_len(cur)?;
	// Every pair occupies at least two bytes.
	if count.saturating_mul(2) > cur.remaining() {
		return Err(PackError::UnexpectedEof {
			at: cur.pos(),
			need: count.saturating_mul(2),
			rem: cur.remaining(),
		});
	}
	let mut pairs: Vec<(WireValue<'static>, WireValue<'static>)> = Vec::with_capacity(count);
	for _ in 0..count {
		let key = decode_at_depth(cur, opts, depth + 1)?;
		let value = decode_at_depth(cur, opts, depth + 1)?;
		// Last write wins: a repeated key replaces the earlier value in
		// place, keeping the pair at its first position.
		match pairs.iter().position(|(existing, _)| *existing == key) {
			Some(index) => pairs[index].1 = value,
			None => pairs.push((key, value)),
		}
	}
	Ok(WireValue::Map(pairs))
}

fn read_array_len(cur: &mut Cursor<'_>) -> Result<usize> {
	let at = cur.pos();
	let byte = cur.read_u8()?;
	match byte {
		tag::FIXARRAY_BASE..=0x9f => Ok(usize::from(byte & 0x0f)),
		tag::ARRAY16 => Ok(usize::from(cur.read_u16_be()?)),
		tag::ARRAY32 => Ok(cur.read_u32_be()? as usize),
		_ => Err(PackError::TagMismatch { expected: "array", tag: byte, at }),
	}
}

fn read_map_len(cur: &mut Cursor<'_>) -> Result<usize> {
	let at = cur.pos();
	let byte = cur.read_u8()?;
	match byte {
		tag::FIXMAP_BASE..=0x8f => Ok(usize::from(byte & 0x0f)),
		tag::MAP16 => Ok(usize::from(cur.read_u16_be()?)),
		tag::MAP32 => Ok(cur.read_u32_be()? as usize),
		_ => Err(PackError::TagMismatch { expected: "map", tag: byte, at }),
	}
}

#[cfg(test)]
mod tests {
	use super::{DecodeOptions, decode_slice, decode_value};
	use crate::pack::bytes::Cursor;
	use crate::pack::error::PackError;
	use crate::pack::value::WireValue;

	fn decode(bytes: &[u8]) -> WireValue<'static> {
		decode_slice(bytes, &DecodeOptions::default()).unwrap()
	}

	#[test]
	fn scalars_dispatch_by_tag() {
		assert_eq!(decode(&[0xc0]), WireValue::Null);
		assert_eq!(decode(&[0xc3]), WireValue::Bool(true));
		assert_eq!(decode(&[0x2a]), WireValue::I64(42));
		assert_eq!(decode(&[0xa2, b'h', b'i']), WireValue::Str("hi".into()));
		assert_eq!(decode(&[0xc4, 0x02, 0xde, 0xad]), WireValue::Bytes(vec![0xde, 0xad]));
	}

	#[test]
	fn nested_sequence_preserves_element_order() {
		// ["a", [5, "b"], "c"]
		let bytes = [0x93, 0xa1, b'a', 0x92, 0x05, 0xa1, b'b', 0xa1, b'c'];
		let expected = WireValue::Seq(vec![
			WireValue::Str("a".into()),
			WireValue::Seq(vec![WireValue::I64(5), WireValue::Str("b".into())]),
			WireValue::Str("c".into()),
		]);
		assert_eq!(decode(&bytes), expected);
	}

	#[test]
	fn repeated_map_key_keeps_last_value() {
		// {1: "x", 1: "y"}
		let bytes = [0x82, 0x01, 0xa1, b'x', 0x01, 0xa1, b'y'];
		let expected = WireValue::Map(vec![(WireValue::I64(1), WireValue::Str("y".into()))]);
		assert_eq!(decode(&bytes), expected);
	}

	#[test]
	fn repeated_key_replacement_keeps_first_position() {
		// {1: "x", 2: "m", 1: "y"}
		let bytes = [0x83, 0x01, 0xa1, b'x', 0x02, 0xa1, b'm', 0x01, 0xa1, b'y'];
		let expected = WireValue::Map(vec![
			(WireValue::I64(1), WireValue::Str("y".into())),
			(WireValue::I64(2), WireValue::Str("m".into())),
		]);
		assert_eq!(decode(&bytes), expected);
	}

	#[test]
	fn reserved_tag_is_rejected_with_offset() {
		let bytes = [0x91, 0xc1];
		match decode_slice(&bytes, &DecodeOptions::default()) {
			Err(PackError::UnknownTag { tag: 0xc1, at: 1 }) => {}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn ext_tags_are_rejected() {
		for byte in [0xc7u8, 0xc8, 0xc9, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8] {
			match decode_slice(&[byte], &DecodeOptions::default()) {
				Err(PackError::UnknownTag { tag, at: 0 }) => assert_eq!(tag, byte),
				other => panic!("tag 0x{byte:02x}: unexpected result: {other:?}"),
			}
		}
	}

	#[test]
	fn truncated_container_fails_before_allocating() {
		// array32 declaring u32::MAX elements with no element bytes
		let bytes = [0xdd, 0xff, 0xff, 0xff, 0xff];
		match decode_slice(&bytes, &DecodeOptions::default()) {
			Err(PackError::UnexpectedEof { need, rem: 0, .. }) => assert_eq!(need, u32::MAX as usize),
			other => panic!("unexpected result: {other:?}"),
		}

		// fixarray of 2 with a single element present
		match decode_slice(&[0x92, 0x01], &DecodeOptions::default()) {
			Err(PackError::UnexpectedEof { need: 2, rem: 1, .. }) => {}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn depth_limit_bounds_nesting() {
		// [[[5]]] nests containers three deep
		let bytes = [0x91, 0x91, 0x91, 0x05];
		let opts = DecodeOptions { max_depth: Some(2) };
		match decode_slice(&bytes, &opts) {
			Err(PackError::DepthLimitExceeded { max_depth: 2 }) => {}
			other => panic!("unexpected result: {other:?}"),
		}
		// [[5]] stays within the limit
		assert!(decode_slice(&[0x91, 0x91, 0x05], &opts).is_ok());
	}

	#[test]
	fn default_depth_is_unbounded() {
		let mut bytes = vec![0x91u8; 64];
		bytes.push(0x05);
		assert!(decode_slice(&bytes, &DecodeOptions::default()).is_ok());
	}

	#[test]
	fn slice_decode_rejects_trailing_bytes() {
		match decode_slice(&[0x05, 0x06], &DecodeOptions::default()) {
			Err(PackError::TrailingBytes { remaining: 1 }) => {}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn cursor_decode_stops_after_one_value() {
		let bytes = [0x05, 0x06];
		let mut cur = Cursor::new(&bytes);
		assert_eq!(decode_value(&mut cur, &DecodeOptions::default()).unwrap(), WireValue::I64(5));
		assert_eq!(cur.remaining(), 1);
		assert_eq!(decode_value(&mut cur, &DecodeOptions::default()).unwrap(), WireValue::I64(6));
	}
}
