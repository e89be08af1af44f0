use crate::pack::{PackError, Result};

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return the next byte without advancing (tag lookahead).
	pub fn peek(&self) -> Result<u8> {
		self.bytes.get(self.pos).copied().ok_or(PackError::UnexpectedEof {
			at: self.pos,
			need: 1,
			rem: 0,
		})
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(PackError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a single byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		let raw = self.read_exact(1)?;
		Ok(raw[0])
	}

	/// Read a single byte as `i8`.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Read a big-endian `u16`.
	pub fn read_u16_be(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		Ok(u16::from_be_bytes(buf))
	}

	/// Read a big-endian `u32`.
	pub fn read_u32_be(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(u32::from_be_bytes(buf))
	}

	/// Read a big-endian `u64`.
	pub fn read_u64_be(&mut self) -> Result<u64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(u64::from_be_bytes(buf))
	}

	/// Read a big-endian `i16`.
	pub fn read_i16_be(&mut self) -> Result<i16> {
		Ok(self.read_u16_be()? as i16)
	}

	/// Read a big-endian `i32`.
	pub fn read_i32_be(&mut self) -> Result<i32> {
		Ok(self.read_u32_be()? as i32)
	}

	/// Read a big-endian `i64`.
	pub fn read_i64_be(&mut self) -> Result<i64> {
		Ok(self.read_u64_be()? as i64)
	}

	/// Read a big-endian IEEE 754 `f32`.
	pub fn read_f32_be(&mut self) -> Result<f32> {
		Ok(f32::from_bits(self.read_u32_be()?))
	}

	/// Read a big-endian IEEE 754 `f64`.
	pub fn read_f64_be(&mut self) -> Result<f64> {
		Ok(f64::from_bits(self.read_u64_be()?))
	}
}

#[cfg(test)]
mod tests {
	use super::Cursor;
	use crate::pack::PackError;

	#[test]
	fn peek_does_not_advance() {
		let cursor = Cursor::new(&[0xc0, 0x01]);
		assert_eq!(cursor.peek().expect("peek succeeds"), 0xc0);
		assert_eq!(cursor.pos(), 0);
		assert_eq!(cursor.remaining(), 2);
	}

	#[test]
	fn peek_at_end_reports_eof() {
		let mut cursor = Cursor::new(&[0x01]);
		cursor.read_u8().expect("byte reads");
		let err = cursor.peek().expect_err("peek past end should fail");
		assert!(matches!(err, PackError::UnexpectedEof { at: 1, need: 1, rem: 0 }));
	}

	#[test]
	fn typed_reads_are_big_endian() {
		let mut cursor = Cursor::new(&[0x12, 0x34, 0x56, 0x78]);
		assert_eq!(cursor.read_u16_be().expect("u16 reads"), 0x1234);
		assert_eq!(cursor.read_u16_be().expect("u16 reads"), 0x5678);
	}

	#[test]
	fn short_read_reports_need_and_remaining() {
		let mut cursor = Cursor::new(&[0x01, 0x02]);
		let err = cursor.read_u32_be().expect_err("u32 from two bytes should fail");
		assert!(matches!(err, PackError::UnexpectedEof { at: 0, need: 4, rem: 2 }));
	}

	#[test]
	fn float_reads_preserve_bits() {
		let bits = 1.5_f64.to_bits().to_be_bytes();
		let mut cursor = Cursor::new(&bits);
		assert_eq!(cursor.read_f64_be().expect("f64 reads").to_bits(), 1.5_f64.to_bits());
	}
}
