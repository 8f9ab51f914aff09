// SPDX-License-Identifier: GPL-3.0

use anyhow::Result;
use clap::Args;
use pop_tx::{Balance, percent_of, percent_of_unit};

#[derive(Args, Clone)]
pub(crate) struct PercentCommand {
	/// The percentage, e.g. `50` for half a token.
	value: Balance,
	/// Base amount to take the percentage of, instead of one whole token.
	#[arg(long)]
	unit: Option<Balance>,
}

impl PercentCommand {
	/// Executes the command.
	pub(crate) fn execute(&self) -> Result<String> {
		let amount = match self.unit {
			Some(unit) => percent_of_unit(self.value, unit)?,
			None => percent_of(self.value)?,
		};
		Ok(amount.to_string())
	}
}
