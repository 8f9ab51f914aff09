// SPDX-License-Identifier: GPL-3.0

use anyhow::Result;
use assert_cmd::Command;

#[test]
fn percent_works() -> Result<()> {
	Command::cargo_bin("pop-tx")?
		.args(["percent", "50"])
		.assert()
		.success()
		.stdout("500000000000000000\n");
	Command::cargo_bin("pop-tx")?
		.args(["percent", "1", "--unit", "150"])
		.assert()
		.success()
		.stdout("1\n");
	Ok(())
}

#[test]
fn decode_works() -> Result<()> {
	Command::cargo_bin("pop-tx")?
		.args(["decode", "0x48656c6c6f"])
		.assert()
		.success()
		.stdout("Hello\n");
	Ok(())
}

#[test]
fn decode_fails_on_invalid_hex() -> Result<()> {
	Command::cargo_bin("pop-tx")?.args(["decode", "0xzz"]).assert().failure();
	Ok(())
}

#[test]
fn send_fails_on_invalid_address() -> Result<()> {
	Command::cargo_bin("pop-tx")?
		.args(["send", "--path", "pool.contract", "--contract", "0x01", "--message", "mint"])
		.env("POP_TX_ENV", "test")
		.assert()
		.failure();
	Ok(())
}
