#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

#[test]
fn decode_json_output_matches_payload_structure() {
	let json = run_json(vec![
		"decode".to_owned(),
		fixture_path("handshake.hex").display().to_string(),
		"--hex".to_owned(),
		"--json".to_owned(),
	]);

	assert_eq!(json["input_bytes"], 91);
	assert_eq!(
		json["value"],
		serde_json::json!({
			"session": "T1",
			"seq": 7,
			"ok": true,
			"ratio": 0.5,
			"peer": null,
			"blob": {"$bin": "deadbeef"},
			"tags": ["a", "b", "c"],
			"limits": {"depth": -3, "width": 70000},
		})
	);
}

#[test]
fn decode_rejects_reserved_tag() {
	let stderr = run_failure(vec![
		"decode".to_owned(),
		fixture_path("reserved.hex").display().to_string(),
		"--hex".to_owned(),
	]);

	assert!(stderr.contains("unknown type tag 0xc1"), "stderr: {stderr}");
}

#[test]
fn info_json_output_counts_kinds() {
	let json = run_json(vec![
		"info".to_owned(),
		fixture_path("handshake.hex").display().to_string(),
		"--hex".to_owned(),
		"--json".to_owned(),
	]);

	assert_eq!(json["input_bytes"], 91);
	assert_eq!(json["values"], 24);
	assert_eq!(json["max_depth"], 2);
	assert_eq!(
		json["kinds"],
		serde_json::json!([
			{"kind": "str", "count": 14},
			{"kind": "int", "count": 3},
			{"kind": "map", "count": 2},
			{"kind": "bool", "count": 1},
			{"kind": "bytes", "count": 1},
			{"kind": "float64", "count": 1},
			{"kind": "null", "count": 1},
			{"kind": "seq", "count": 1},
		])
	);
}

#[test]
fn request_json_output_encodes_console_destroy() {
	let json = run_json(vec![
		"request".to_owned(),
		"console".to_owned(),
		"destroy".to_owned(),
		"T1".to_owned(),
		"C1".to_owned(),
		"--json".to_owned(),
	]);

	assert_eq!(json["method"], "console.destroy");
	assert_eq!(json["payload"], serde_json::json!(["console.destroy", "T1", "C1"]));
	assert_eq!(json["encoded_len"], 23);
	assert_eq!(json["encoded_hex"], "93af636f6e736f6c652e64657374726f79a25431a24331");
}

#[test]
fn request_encoding_matches_console_destroy_fixture() {
	let decoded = run_json(vec![
		"decode".to_owned(),
		fixture_path("console_destroy.hex").display().to_string(),
		"--hex".to_owned(),
		"--json".to_owned(),
	]);
	assert_eq!(decoded["value"], serde_json::json!(["console.destroy", "T1", "C1"]));

	let recorded: String = std::fs::read_to_string(fixture_path("console_destroy.hex"))
		.expect("fixture readable")
		.chars()
		.filter(|c| !c.is_ascii_whitespace())
		.collect();
	let built = run_json(vec![
		"request".to_owned(),
		"console".to_owned(),
		"destroy".to_owned(),
		"T1".to_owned(),
		"C1".to_owned(),
		"--json".to_owned(),
	]);
	assert_eq!(built["encoded_hex"], Value::String(recorded));
}

#[test]
fn request_drops_unset_trailing_option() {
	let json = run_json(vec![
		"request".to_owned(),
		"module".to_owned(),
		"execute".to_owned(),
		"T1".to_owned(),
		"exploit".to_owned(),
		"scanner/probe".to_owned(),
		"--json".to_owned(),
	]);

	assert_eq!(
		json["payload"],
		serde_json::json!(["module.execute", "T1", "exploit", "scanner/probe"])
	);
}

#[test]
fn request_module_options_survive_encoding() {
	let json = run_json(vec![
		"request".to_owned(),
		"module".to_owned(),
		"execute".to_owned(),
		"T1".to_owned(),
		"exploit".to_owned(),
		"scanner/probe".to_owned(),
		"RHOSTS=10.0.0.5".to_owned(),
		"LPORT=4444".to_owned(),
		"--json".to_owned(),
	]);

	let payload = json["payload"].as_array().expect("payload array");
	assert_eq!(payload.len(), 5);
	assert_eq!(payload[4], serde_json::json!({"RHOSTS": "10.0.0.5", "LPORT": "4444"}));
}

#[test]
fn encode_then_decode_round_trips() {
	let encoded = std::env::temp_dir().join(format!("wirepack_roundtrip_{}.bin", std::process::id()));

	let output = Command::new(env!("CARGO_BIN_EXE_wirepack"))
		.args([
			"encode".to_owned(),
			fixture_path("sample.json").display().to_string(),
			"--out".to_owned(),
			encoded.display().to_string(),
		])
		.output()
		.expect("command executes");
	assert!(output.status.success(), "encode should succeed");

	let json = run_json(vec![
		"decode".to_owned(),
		encoded.display().to_string(),
		"--json".to_owned(),
	]);
	let _ = std::fs::remove_file(&encoded);

	let source = std::fs::read_to_string(fixture_path("sample.json")).expect("fixture readable");
	let expected: Value = serde_json::from_str(&source).expect("fixture should be valid json");
	assert_eq!(json["value"], expected);
}

fn run_json(args: Vec<String>) -> Value {
	let output = Command::new(env!("CARGO_BIN_EXE_wirepack")).args(&args).output().expect("command executes");

	assert!(output.status.success(), "command should succeed");
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn run_failure(args: Vec<String>) -> String {
	let output = Command::new(env!("CARGO_BIN_EXE_wirepack")).args(&args).output().expect("command executes");

	assert!(!output.status.success(), "command should fail");
	String::from_utf8_lossy(&output.stderr).into_owned()
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
