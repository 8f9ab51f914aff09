// SPDX-License-Identifier: GPL-3.0

use crate::style::format_field;
use clap::Args;
use pop_tx::{build_gas_limit, default_call_options};

#[derive(Args, Clone)]
pub(crate) struct GasLimitCommand {
	/// Reference time, instead of the default.
	#[arg(long)]
	ref_time: Option<u64>,
	/// Proof size, instead of the default.
	#[arg(long)]
	proof_size: Option<u64>,
}

impl GasLimitCommand {
	/// Executes the command.
	pub(crate) fn execute(&self) -> String {
		let options =
			default_call_options().with_gas_limit(build_gas_limit(self.ref_time, self.proof_size));
		[
			format_field("ref time", options.gas_limit.ref_time()),
			format_field("proof size", options.gas_limit.proof_size()),
			format_field("storage deposit limit", options.storage_deposit_limit),
		]
		.join("\n")
	}
}
