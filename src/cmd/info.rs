use std::collections::HashMap;
use std::path::PathBuf;

use wirepack::pack::{DecodeOptions, Result, WireValue, decode_slice};

use crate::cmd::util::{emit_json, read_payload};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub hex: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print payload statistics without dumping the full value tree.
pub fn run(args: Args) -> Result<()> {
	let Args { path, hex, json } = args;

	let input = read_payload(&path, hex)?;
	let value = decode_slice(&input, &DecodeOptions::default())?;

	let mut stats = Stats::default();
	scan_value(&value, 0, &mut stats);

	let mut entries: Vec<_> = stats.kinds.into_iter().collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			input_bytes: input.len(),
			values: stats.values,
			max_depth: stats.max_depth,
			kinds: entries
				.iter()
				.map(|(kind, count)| KindCountJson { kind, count: *count })
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("input_bytes: {}", input.len());
	println!("values: {}", stats.values);
	println!("max_depth: {}", stats.max_depth);

	println!("kinds:");
	for (kind, count) in entries {
		println!("  {}: {}", kind, count);
	}

	Ok(())
}

#[derive(Debug, Default)]
struct Stats {
	values: usize,
	max_depth: u32,
	kinds: HashMap<&'static str, usize>,
}

fn scan_value(value: &WireValue<'_>, depth: u32, stats: &mut Stats) {
	stats.values += 1;
	stats.max_depth = stats.max_depth.max(depth);
	*stats.kinds.entry(value.kind()).or_insert(0) += 1;

	match value {
		WireValue::Seq(items) => {
			for item in items {
				scan_value(item, depth + 1, stats);
			}
		}
		WireValue::Map(pairs) => {
			for (key, val) in pairs {
				scan_value(key, depth + 1, stats);
				scan_value(val, depth + 1, stats);
			}
		}
		WireValue::Entry(pair) => {
			scan_value(&pair.0, depth + 1, stats);
			scan_value(&pair.1, depth + 1, stats);
		}
		_ => {}
	}
}

#[derive(serde::Serialize)]
struct KindCountJson {
	kind: &'static str,
	count: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	input_bytes: usize,
	values: usize,
	max_depth: u32,
	kinds: Vec<KindCountJson>,
}
