// SPDX-License-Identifier: GPL-3.0

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("Anyhow error: {0}")]
	AnyhowError(#[from] anyhow::Error),

	#[error("Failed to parse account address: {0}")]
	AccountAddressParsing(String),

	#[error("Failed to parse balance: {0}")]
	BalanceParsing(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Waiting for finalization was cancelled")]
	FinalizationCancelled,

	#[error("Transaction not finalized after {attempts} attempts ({elapsed:?})")]
	FinalizationTimeout { attempts: u32, elapsed: Duration },

	#[error("Failed to parse hex encoded bytes: {0}")]
	HexParsing(String),

	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),

	#[error("Failed to create keypair from URI: {0}")]
	KeyPairCreation(String),

	#[error("Arithmetic overflow: {0}")]
	Overflow(String),

	#[error("Failed to parse secret URI: {0}")]
	ParseSecretURI(String),

	#[error("Pre-submission dry-run of {contract}.{method}({args}) failed: {reason}")]
	Preview { contract: String, method: String, args: String, reason: String },

	#[error("Failed to decode text: {0}")]
	TextDecoding(String),

	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
}
