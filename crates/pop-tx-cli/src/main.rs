// SPDX-License-Identifier: GPL-3.0

mod commands;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, styles=style::get_styles())]
pub struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
#[command(subcommand_required = true)]
enum Commands {
	/// Calculate a percentage of one whole token.
	#[clap(alias = "p")]
	Percent(commands::percent::PercentCommand),
	/// Show the gas limit and storage deposit limit used for contract calls.
	#[clap(alias = "g")]
	GasLimit(commands::gas::GasLimitCommand),
	/// Decode hex encoded bytes into text.
	#[clap(alias = "d")]
	Decode(commands::decode::DecodeCommand),
	/// Preview a contract call and, if successful, submit it and wait for its finalization.
	#[clap(alias = "s")]
	Send(commands::send::SendCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("pop_tx=info"))
		.init();
	let cli = Cli::parse();
	let output = match cli.command {
		Commands::Percent(cmd) => cmd.execute()?,
		Commands::GasLimit(cmd) => cmd.execute(),
		Commands::Decode(cmd) => cmd.execute()?,
		Commands::Send(cmd) => cmd.execute().await?,
	};
	println!("{output}");
	Ok(())
}

#[test]
fn verify_cli() {
	// https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html
	use clap::CommandFactory;
	Cli::command().debug_assert()
}
