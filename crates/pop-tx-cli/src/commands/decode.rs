// SPDX-License-Identifier: GPL-3.0

use anyhow::Result;
use clap::Args;
use pop_tx::decode_hex_str_to_text;

#[derive(Args, Clone)]
pub(crate) struct DecodeCommand {
	/// Hex encoded bytes, with or without a `0x` prefix.
	data: String,
}

impl DecodeCommand {
	/// Executes the command.
	pub(crate) fn execute(&self) -> Result<String> {
		Ok(decode_hex_str_to_text(&self.data)?)
	}
}
