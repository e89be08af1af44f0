use std::path::Path;

use wirepack::pack::{PackError, Result, WireValue, present_field_values};

/// Read a payload file: raw bytes, or ASCII hex text when `hex` is set.
pub(crate) fn read_payload(path: &Path, hex: bool) -> Result<Vec<u8>> {
	if hex {
		let text = std::fs::read_to_string(path)?;
		parse_hex(&text)
	} else {
		Ok(std::fs::read(path)?)
	}
}

/// Parse ASCII hex into bytes, ignoring whitespace.
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(input.len() / 2);
	let mut high: Option<u8> = None;
	for (at, ch) in input.char_indices() {
		if ch.is_ascii_whitespace() {
			continue;
		}
		let digit = match ch.to_digit(16) {
			Some(digit) => digit as u8,
			None => return Err(PackError::InvalidHexInput { at }),
		};
		high = match high {
			None => Some(digit),
			Some(carried) => {
				out.push(carried << 4 | digit);
				None
			}
		};
	}
	if high.is_some() {
		return Err(PackError::InvalidHexInput { at: input.len() });
	}
	Ok(out)
}

/// Render bytes as contiguous lowercase hex.
pub(crate) fn render_hex(bytes: &[u8]) -> String {
	bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Pretty-print a serializable payload to stdout as JSON.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: {err}"),
	}
}

/// Render a decoded value as JSON.
///
/// Forms without a native JSON shape use tagged one-key objects: bytes as
/// `{"$bin": "<hex>"}`, a map with non-string or repeated keys as
/// `{"$map": [[k, v], ...]}`, an entry as `{"$entry": [k, v]}`. A map whose
/// keys are all distinct strings renders as a plain object. Records render
/// as their positional array of present field values, matching their wire
/// shape.
pub(crate) fn value_to_json(value: &WireValue<'_>) -> serde_json::Value {
	use serde_json::{Map, Value as JsonValue};

	match value {
		WireValue::Null => JsonValue::Null,
		WireValue::Bool(v) => serde_json::json!(v),
		WireValue::I64(v) => serde_json::json!(v),
		WireValue::U64(v) => serde_json::json!(v),
		WireValue::F32(v) => serde_json::json!(v),
		WireValue::F64(v) => serde_json::json!(v),
		WireValue::Str(v) => serde_json::json!(v.as_ref()),
		WireValue::Bytes(v) => {
			let mut out = Map::new();
			out.insert("$bin".to_owned(), serde_json::json!(render_hex(v)));
			JsonValue::Object(out)
		}
		WireValue::Seq(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		WireValue::Map(pairs) => {
			let mut object = Map::with_capacity(pairs.len());
			let mut plain = true;
			for (key, val) in pairs {
				match key {
					WireValue::Str(name) => {
						object.insert(name.to_string(), value_to_json(val));
					}
					_ => {
						plain = false;
						break;
					}
				}
			}
			// Repeated string keys would collapse inside an object, so a
			// length mismatch routes those through the pair-list form too.
			if plain && object.len() == pairs.len() {
				JsonValue::Object(object)
			} else {
				let entries: Vec<JsonValue> = pairs
					.iter()
					.map(|(key, val)| JsonValue::Array(vec![value_to_json(key), value_to_json(val)]))
					.collect();
				let mut out = Map::new();
				out.insert("$map".to_owned(), JsonValue::Array(entries));
				JsonValue::Object(out)
			}
		}
		WireValue::Entry(pair) => {
			let mut out = Map::new();
			out.insert(
				"$entry".to_owned(),
				JsonValue::Array(vec![value_to_json(&pair.0), value_to_json(&pair.1)]),
			);
			JsonValue::Object(out)
		}
		WireValue::Record(record) => {
			JsonValue::Array(present_field_values(*record).iter().map(value_to_json).collect())
		}
	}
}

/// Parse a JSON document into an encodable value, recognizing the tagged
/// forms `value_to_json` emits.
pub(crate) fn json_to_value(json: &serde_json::Value) -> Result<WireValue<'static>> {
	match json {
		serde_json::Value::Null => Ok(WireValue::Null),
		serde_json::Value::Bool(v) => Ok(WireValue::Bool(*v)),
		serde_json::Value::Number(number) => {
			if let Some(v) = number.as_i64() {
				Ok(WireValue::I64(v))
			} else if let Some(v) = number.as_u64() {
				Ok(WireValue::U64(v))
			} else {
				number.as_f64().map(WireValue::F64).ok_or_else(|| PackError::InvalidJsonInput {
					detail: format!("unrepresentable number {number}"),
				})
			}
		}
		serde_json::Value::String(v) => Ok(WireValue::Str(v.as_str().into())),
		serde_json::Value::Array(items) => {
			let mut elems = Vec::with_capacity(items.len());
			for item in items {
				elems.push(json_to_value(item)?);
			}
			Ok(WireValue::Seq(elems))
		}
		serde_json::Value::Object(object) => {
			if object.len() == 1 {
				if let Some(special) = object.get("$bin") {
					let serde_json::Value::String(hex) = special else {
						return Err(PackError::InvalidJsonInput { detail: "$bin expects a hex string".to_owned() });
					};
					return Ok(WireValue::Bytes(parse_hex(hex)?));
				}
				if let Some(special) = object.get("$map") {
					return Ok(WireValue::Map(pair_list(special, "$map")?));
				}
				if let Some(special) = object.get("$entry") {
					return Ok(WireValue::Entry(Box::new(json_pair(special, "$entry")?)));
				}
			}
			let mut pairs = Vec::with_capacity(object.len());
			for (key, val) in object {
				pairs.push((WireValue::Str(key.as_str().into()), json_to_value(val)?));
			}
			Ok(WireValue::Map(pairs))
		}
	}
}

fn pair_list(json: &serde_json::Value, form: &str) -> Result<Vec<(WireValue<'static>, WireValue<'static>)>> {
	let serde_json::Value::Array(entries) = json else {
		return Err(PackError::InvalidJsonInput { detail: format!("{form} expects an array of [key, value] pairs") });
	};
	let mut pairs = Vec::with_capacity(entries.len());
	for entry in entries {
		pairs.push(json_pair(entry, form)?);
	}
	Ok(pairs)
}

fn json_pair(json: &serde_json::Value, form: &str) -> Result<(WireValue<'static>, WireValue<'static>)> {
	let serde_json::Value::Array(pair) = json else {
		return Err(PackError::InvalidJsonInput { detail: format!("{form} expects [key, value] pairs") });
	};
	let [key, value] = pair.as_slice() else {
		return Err(PackError::InvalidJsonInput { detail: format!("{form} expects [key, value] pairs") });
	};
	Ok((json_to_value(key)?, json_to_value(value)?))
}
