use std::path::PathBuf;

use wirepack::pack::{
	AuthLoginRequest, AuthLogoutRequest, ConsoleCreateRequest, ConsoleDestroyRequest,
	ConsoleReadRequest, ConsoleWriteRequest, ModuleExecuteRequest, PackError, Result, RpcRequest,
	encode_request_to_vec, linearize,
};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, render_hex, value_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub group: String,
	pub method: String,
	pub args: Vec<String>,
	#[arg(long)]
	pub out: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Build a catalog request from positional arguments and encode it.
pub fn run(args: Args) -> Result<()> {
	let Args { group, method, args: call_args, out, json } = args;

	let request = build_request(&group, &method, &call_args)?;
	let fields = linearize(request.as_ref());
	let encoded = encode_request_to_vec(request.as_ref())?;

	if let Some(out) = &out {
		std::fs::write(out, &encoded)?;
	}

	if json {
		let payload = RequestJson {
			method: request.method_name(),
			payload: fields.iter().map(value_to_json).collect(),
			encoded_len: encoded.len(),
			encoded_hex: render_hex(&encoded),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("method: {}", request.method_name());
	println!("payload:");
	for item in &fields {
		print_value(item, 2, 0, PrintOptions::default());
	}
	println!("encoded_len: {}", encoded.len());
	println!("encoded_hex: {}", render_hex(&encoded));
	if let Some(out) = out {
		println!("wrote: {}", out.display());
	}

	Ok(())
}

fn build_request(group: &str, method: &str, args: &[String]) -> Result<Box<dyn RpcRequest>> {
	match (group, method) {
		("auth", "login") => match args {
			[username, password] => Ok(Box::new(AuthLoginRequest {
				username: username.clone(),
				password: password.clone(),
			})),
			_ => Err(arity("auth.login", 2, args.len())),
		},
		("auth", "logout") => match args {
			[token, logout_token] => Ok(Box::new(AuthLogoutRequest {
				token: token.clone(),
				logout_token: logout_token.clone(),
			})),
			_ => Err(arity("auth.logout", 2, args.len())),
		},
		("console", "create") => match args {
			[token] => Ok(Box::new(ConsoleCreateRequest { token: token.clone() })),
			_ => Err(arity("console.create", 1, args.len())),
		},
		("console", "destroy") => match args {
			[token, console_id] => Ok(Box::new(ConsoleDestroyRequest {
				token: token.clone(),
				console_id: console_id.clone(),
			})),
			_ => Err(arity("console.destroy", 2, args.len())),
		},
		("console", "read") => match args {
			[token, console_id] => Ok(Box::new(ConsoleReadRequest {
				token: token.clone(),
				console_id: console_id.clone(),
			})),
			_ => Err(arity("console.read", 2, args.len())),
		},
		("console", "write") => match args {
			[token, console_id, data] => Ok(Box::new(ConsoleWriteRequest {
				token: token.clone(),
				console_id: console_id.clone(),
				data: data.clone(),
			})),
			_ => Err(arity("console.write", 3, args.len())),
		},
		("module", "execute") => match args {
			[token, module_type, module_name, rest @ ..] => Ok(Box::new(ModuleExecuteRequest {
				token: token.clone(),
				module_type: module_type.clone(),
				module_name: module_name.clone(),
				options: parse_options(rest)?,
			})),
			_ => Err(arity("module.execute", 3, args.len())),
		},
		_ => Err(PackError::UnknownMethod { method: format!("{group}.{method}") }),
	}
}

fn arity(method: &'static str, expected: usize, got: usize) -> PackError {
	PackError::RequestArity { method, expected, got }
}

/// Parse trailing `KEY=VALUE` arguments into the options map. An empty
/// tail leaves the optional field unset.
fn parse_options(rest: &[String]) -> Result<Option<Vec<(String, String)>>> {
	if rest.is_empty() {
		return Ok(None);
	}
	let mut options = Vec::with_capacity(rest.len());
	for arg in rest {
		let Some((key, value)) = arg.split_once('=') else {
			return Err(PackError::BadOptionArg { arg: arg.clone() });
		};
		options.push((key.to_owned(), value.to_owned()));
	}
	Ok(Some(options))
}

#[derive(serde::Serialize)]
struct RequestJson {
	method: String,
	payload: Vec<serde_json::Value>,
	encoded_len: usize,
	encoded_hex: String,
}

#[cfg(test)]
mod tests {
	use wirepack::pack::PackError;

	use super::{build_request, parse_options};

	fn strings(items: &[&str]) -> Vec<String> {
		items.iter().map(|item| (*item).to_owned()).collect()
	}

	#[test]
	fn dispatch_covers_the_catalog() {
		let cases: [(&str, &str, &[&str]); 7] = [
			("auth", "login", &["root", "hunter2"]),
			("auth", "logout", &["T1", "T1"]),
			("console", "create", &["T1"]),
			("console", "destroy", &["T1", "C1"]),
			("console", "read", &["T1", "C1"]),
			("console", "write", &["T1", "C1", "ls\n"]),
			("module", "execute", &["T1", "exploit", "scanner/probe"]),
		];
		for (group, method, args) in cases {
			let request = build_request(group, method, &strings(args)).unwrap();
			assert_eq!(request.method_name(), format!("{group}.{method}"));
		}
	}

	#[test]
	fn unknown_method_is_rejected() {
		match build_request("console", "reboot", &[]) {
			Err(PackError::UnknownMethod { method }) => assert_eq!(method, "console.reboot"),
			Err(other) => panic!("unexpected error: {other:?}"),
			Ok(request) => panic!("unexpected success: {}", request.method_name()),
		}
	}

	#[test]
	fn wrong_arity_is_rejected() {
		match build_request("console", "destroy", &strings(&["T1"])) {
			Err(PackError::RequestArity { method: "console.destroy", expected: 2, got: 1 }) => {}
			Err(other) => panic!("unexpected error: {other:?}"),
			Ok(request) => panic!("unexpected success: {}", request.method_name()),
		}
	}

	#[test]
	fn module_options_parse_from_trailing_args() {
		let request = build_request(
			"module",
			"execute",
			&strings(&["T1", "exploit", "scanner/probe", "RHOSTS=10.0.0.5", "LPORT=4444"]),
		)
		.unwrap();
		assert!(request.field_value(3).is_some());

		match parse_options(&strings(&["nope"])) {
			Err(PackError::BadOptionArg { arg }) => assert_eq!(arg, "nope"),
			other => panic!("unexpected result: {other:?}"),
		}
		assert_eq!(parse_options(&[]).unwrap(), None);
	}
}
