#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "wirepack", about = "MessagePack payload inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Decode(cmd::decode::Args),
	Encode(cmd::encode::Args),
	Info(cmd::info::Args),
	Request(cmd::request::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> wirepack::pack::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Info(args) => cmd::info::run(args),
		Commands::Request(args) => cmd::request::run(args),
	}
}
