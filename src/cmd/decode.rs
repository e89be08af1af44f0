use std::path::PathBuf;

use wirepack::pack::{DecodeOptions, Result, decode_slice};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, read_payload, value_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub hex: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode one payload and print the value tree.
pub fn run(args: Args) -> Result<()> {
	let Args { path, hex, max_depth, json } = args;

	let input = read_payload(&path, hex)?;
	let options = DecodeOptions { max_depth };
	let value = decode_slice(&input, &options)?;

	if json {
		let payload = DecodeJson {
			path: path.display().to_string(),
			input_bytes: input.len(),
			value: value_to_json(&value),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("input_bytes: {}", input.len());
	println!("decoded:");
	print_value(&value, 0, 0, PrintOptions::default());

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	input_bytes: usize,
	value: serde_json::Value,
}
