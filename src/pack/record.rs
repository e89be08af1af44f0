//! Registration-time field tables for structured records.
//!
//! A record type declares its wire shape once, as a static table of
//! [`FieldSpec`] entries in declaration order. The encoder walks that table
//! through the object-safe [`Record`] trait, so it never needs to know the
//! concrete type it is serializing.

use crate::pack::value::WireValue;

/// One field of a structured record.
pub struct FieldSpec<T> {
	/// Field name as declared on the record type.
	pub name: &'static str,
	/// Declaration-order position, starting at zero.
	pub index: usize,
	/// Whether the field may be absent. Absent fields are dropped from the
	/// positional payload, so optional fields must trail all required ones.
	pub optional: bool,
	/// Produces the field's current value, `None` when absent.
	pub get: for<'v> fn(&'v T) -> Option<WireValue<'v>>,
}

/// Field table for one record type.
///
/// Tables are declared as statics, so the record type itself must be
/// `'static`.
pub struct RecordSpec<T: 'static> {
	/// Registered record name.
	pub name: &'static str,
	/// Fields in declaration order.
	pub fields: &'static [FieldSpec<T>],
}

/// A type with a registered static field table.
pub trait RecordType: Sized {
	/// The type's field table.
	fn spec() -> &'static RecordSpec<Self>;
}

/// Object-safe view over a record's field table, used by the encoder.
///
/// Implemented for every `Send + Sync + 'static` [`RecordType`] via a blanket
/// impl; do not implement it by hand.
pub trait Record: Send + Sync {
	/// Registered record name.
	fn record_name(&self) -> &'static str;
	/// Number of declared fields.
	fn field_count(&self) -> usize;
	/// Declared name of field `index`, `None` if out of range.
	fn field_name(&self, index: usize) -> Option<&'static str>;
	/// Optional flag of field `index`, `None` if out of range.
	fn field_optional(&self, index: usize) -> Option<bool>;
	/// Current value of field `index`; `None` when the field is absent or
	/// `index` is out of range.
	fn field_value(&self, index: usize) -> Option<WireValue<'_>>;
}

impl<T: RecordType + Send + Sync + 'static> Record for T {
	fn record_name(&self) -> &'static str {
		T::spec().name
	}

	fn field_count(&self) -> usize {
		T::spec().fields.len()
	}

	fn field_name(&self, index: usize) -> Option<&'static str> {
		T::spec().fields.get(index).map(|field| field.name)
	}

	fn field_optional(&self, index: usize) -> Option<bool> {
		T::spec().fields.get(index).map(|field| field.optional)
	}

	fn field_value(&self, index: usize) -> Option<WireValue<'_>> {
		T::spec().fields.get(index).and_then(|field| (field.get)(self))
	}
}

/// Collects the record's present field values in declaration order.
///
/// Absent optional fields contribute nothing; they do not leave a null
/// placeholder behind.
pub fn present_field_values<R: Record + ?Sized>(record: &R) -> Vec<WireValue<'_>> {
	(0..record.field_count())
		.filter_map(|index| record.field_value(index))
		.collect()
}

/// Checks that no required field follows an optional one in the table.
///
/// Positional payloads identify fields by array position, so an absent
/// interior field would shift every later field one slot left. Declaring
/// optional fields last keeps absence confined to the payload's tail. The
/// encoder cannot enforce this at runtime; record-type tests assert it.
pub fn optional_fields_are_trailing<R: Record + ?Sized>(record: &R) -> bool {
	let mut seen_optional = false;
	for index in 0..record.field_count() {
		match record.field_optional(index) {
			Some(true) => seen_optional = true,
			Some(false) if seen_optional => return false,
			_ => {}
		}
	}
	true
}
