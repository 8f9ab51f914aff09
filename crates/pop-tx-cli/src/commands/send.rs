// SPDX-License-Identifier: GPL-3.0

use crate::style::format_field;
use anyhow::Result;
use clap::Args;
use pop_tx::{
	CallOptions, InkContract, InkContractOpts, TxConfig, build_gas_limit, parse_balance,
	preview_and_send,
};
use std::path::PathBuf;

#[derive(Args, Clone)]
pub(crate) struct SendCommand {
	/// Path to the contract bundle or the contract project directory.
	#[arg(short = 'p', long)]
	path: PathBuf,
	/// The address of the contract to call.
	#[clap(name = "contract", long)]
	contract: String,
	/// Display name of the contract, used in logs and errors.
	#[clap(long)]
	name: Option<String>,
	/// The name of the contract message to call.
	#[clap(long, short)]
	message: String,
	/// The message arguments, encoded as strings.
	#[clap(long, num_args = 0..)]
	args: Vec<String>,
	/// Transfers a balance to the contract.
	#[clap(name = "value", long, default_value = "0")]
	value: String,
	/// Maximum reference time to be used for this call.
	#[clap(name = "gas", long)]
	gas_limit: Option<u64>,
	/// Maximum proof size for this call.
	#[clap(long)]
	proof_size: Option<u64>,
	/// Maximum balance that can be charged for storage.
	#[clap(long)]
	storage_deposit_limit: Option<String>,
	/// Websocket endpoint of a node.
	#[clap(name = "url", long, value_parser, default_value = "ws://localhost:9944")]
	url: url::Url,
	/// Secret key URI for the account calling the contract.
	///
	/// e.g.
	/// - for a dev account "//Alice"
	/// - with a password "//Alice///SECRET_PASSWORD"
	#[clap(name = "suri", long, short, default_value = "//Alice")]
	suri: String,
	/// Path to a TOML file with the finalization policy. Defaults to `POP_TX_*` variables.
	#[clap(long)]
	config: Option<PathBuf>,
}

impl SendCommand {
	/// Executes the command.
	pub(crate) async fn execute(&self) -> Result<String> {
		let config = self.config()?;
		let options = self.call_options()?;
		let contract = InkContract::new(InkContractOpts {
			path: self.path.clone(),
			contract: self.contract.clone(),
			name: self.name.clone(),
			url: self.url.clone(),
			suri: self.suri.clone(),
			value: self.value.clone(),
		})?;
		let submitted = preview_and_send(&contract, &self.message, &self.args, &options, &config)
			.await?;
		Ok(format_field("extrinsic", submitted.extrinsic_hash()))
	}

	fn config(&self) -> Result<TxConfig> {
		let config = match &self.config {
			Some(path) => TxConfig::from_path(path)?,
			None => TxConfig::from_env()?,
		};
		log::debug!("Using {config:?}");
		Ok(config)
	}

	fn call_options(&self) -> Result<CallOptions> {
		let mut options =
			CallOptions::default().with_gas_limit(build_gas_limit(self.gas_limit, self.proof_size));
		if let Some(limit) = &self.storage_deposit_limit {
			options = options.with_storage_deposit_limit(parse_balance(limit)?);
		}
		Ok(options)
	}
}
