use std::path::PathBuf;

use wirepack::pack::{PackError, Result, encode_to_vec};

use crate::cmd::util::{json_to_value, render_hex};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub out: Option<PathBuf>,
}

/// Encode a JSON document into payload bytes.
///
/// Without `--out` the encoding is printed as bare hex, so the output can
/// feed straight back into `decode --hex`.
pub fn run(args: Args) -> Result<()> {
	let Args { path, out } = args;

	let text = std::fs::read_to_string(&path)?;
	let json: serde_json::Value = serde_json::from_str(&text)
		.map_err(|err| PackError::InvalidJsonInput { detail: err.to_string() })?;
	let value = json_to_value(&json)?;
	let encoded = encode_to_vec(&value)?;

	match out {
		Some(out) => {
			std::fs::write(&out, &encoded)?;
			println!("wrote: {} ({} bytes)", out.display(), encoded.len());
		}
		None => println!("{}", render_hex(&encoded)),
	}

	Ok(())
}
