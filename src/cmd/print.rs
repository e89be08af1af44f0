use wirepack::pack::WireValue;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for sequences.
	pub max_array_items: usize,
	/// Maximum number of pairs printed for maps.
	pub max_map_pairs: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_array_items: 16,
			max_map_pairs: 32,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree.
pub fn print_value(value: &WireValue<'_>, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		WireValue::Null => println!("{}null", pad),
		WireValue::Bool(v) => println!("{}{v}", pad),
		WireValue::I64(v) => println!("{}{v}", pad),
		WireValue::U64(v) => println!("{}{v}", pad),
		WireValue::F32(v) => println!("{}{v}", pad),
		WireValue::F64(v) => println!("{}{v}", pad),
		WireValue::Str(v) => println!("{}\"{}\"", pad, truncate(v, options.max_string_len)),
		WireValue::Bytes(v) => println!("{}bytes[{}]", pad, v.len()),
		WireValue::Seq(items) => {
			if depth >= options.max_print_depth {
				println!("{}[... {} items]", pad, items.len());
				return;
			}
			println!("{}[", pad);
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{}  ... {} more", pad, items.len() - options.max_array_items);
			}
			println!("{}]", pad);
		}
		WireValue::Map(pairs) => {
			if depth >= options.max_print_depth {
				println!("{}{{... {} pairs}}", pad, pairs.len());
				return;
			}
			println!("{}{{", pad);
			for (key, val) in pairs.iter().take(options.max_map_pairs) {
				print_pair(key, val, indent, depth, options);
			}
			if pairs.len() > options.max_map_pairs {
				println!("{}  ... {} more pairs", pad, pairs.len() - options.max_map_pairs);
			}
			println!("{}}}", pad);
		}
		WireValue::Entry(pair) => {
			if depth >= options.max_print_depth {
				println!("{}{{... 1 pair}}", pad);
				return;
			}
			println!("{}{{", pad);
			print_pair(&pair.0, &pair.1, indent, depth, options);
			println!("{}}}", pad);
		}
		WireValue::Record(record) => {
			if depth >= options.max_print_depth {
				println!("{}{} {{ ... }}", pad, record.record_name());
				return;
			}
			println!("{}{} {{", pad, record.record_name());
			for position in 0..record.field_count() {
				let Some(name) = record.field_name(position) else {
					continue;
				};
				print!("{}  {} = ", pad, name);
				match record.field_value(position) {
					Some(value) if is_container(&value) => {
						println!();
						print_value(&value, indent + 4, depth + 1, options);
					}
					Some(value) => print_value(&value, 0, depth + 1, options),
					None => println!("(unset)"),
				}
			}
			println!("{}}}", pad);
		}
	}
}

fn print_pair(key: &WireValue<'_>, value: &WireValue<'_>, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	print!("{}  {}: ", pad, inline_label(key, options));
	if is_container(value) {
		println!();
		print_value(value, indent + 4, depth + 1, options);
	} else {
		print_value(value, 0, depth + 1, options);
	}
}

fn is_container(value: &WireValue<'_>) -> bool {
	matches!(
		value,
		WireValue::Seq(_) | WireValue::Map(_) | WireValue::Entry(_) | WireValue::Record(_)
	)
}

fn inline_label(key: &WireValue<'_>, options: PrintOptions) -> String {
	match key {
		WireValue::Null => "null".to_owned(),
		WireValue::Bool(v) => v.to_string(),
		WireValue::I64(v) => v.to_string(),
		WireValue::U64(v) => v.to_string(),
		WireValue::F32(v) => v.to_string(),
		WireValue::F64(v) => v.to_string(),
		WireValue::Str(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		WireValue::Bytes(v) => format!("bytes[{}]", v.len()),
		WireValue::Seq(items) => format!("seq[{}]", items.len()),
		WireValue::Map(pairs) => format!("map[{}]", pairs.len()),
		WireValue::Entry(_) => "entry".to_owned(),
		WireValue::Record(record) => record.record_name().to_owned(),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests {
	use wirepack::pack::WireValue;

	use super::{PrintOptions, inline_label, truncate};

	#[test]
	fn truncate_appends_marker_past_the_limit() {
		assert_eq!(truncate("hello", 5), "hello");
		assert_eq!(truncate("hello", 4), "hell...");
	}

	#[test]
	fn inline_labels_summarize_containers() {
		let options = PrintOptions::default();
		assert_eq!(inline_label(&WireValue::I64(-3), options), "-3");
		assert_eq!(inline_label(&WireValue::Str("key".into()), options), "\"key\"");
		assert_eq!(inline_label(&WireValue::Bytes(vec![0, 1]), options), "bytes[2]");
		assert_eq!(
			inline_label(&WireValue::Seq(vec![WireValue::Null, WireValue::Null]), options),
			"seq[2]"
		);
		assert_eq!(inline_label(&WireValue::Map(Vec::new()), options), "map[0]");
	}
}
