// SPDX-License-Identifier: GPL-3.0

#![doc = include_str!("../README.md")]

mod config;
mod contract;
mod errors;
mod finalization;
mod ink;
mod signer;
pub mod testing;
mod text;
mod units;
mod weight;

pub use config::{
	ENV_MAX_ATTEMPTS, ENV_MODE, ENV_POLL_INTERVAL_MS, ENV_TIMEOUT_MS, FinalizationPolicy, Mode,
	TxConfig, is_test_environment,
};
pub use contract::{
	ContractClient, DryRunOutcome, LOG_TARGET, error_payload, preview_and_send,
	preview_and_send_with_defaults, preview_call, success_message,
};
pub use errors::Error;
pub use finalization::{FinalizationStatus, await_finalization, await_finalization_with_cancel};
pub use ink::{
	CallStatus, InkContract, InkContractOpts, SubmittedCall, get_manifest_path, parse_h160_account,
};
pub use signer::create_signer;
pub use text::{
	decode_hex_bytes_to_text, decode_hex_str_to_text, encode_text_to_hex, parse_hex_bytes,
};
pub use units::{Balance, ONE_UNIT, parse_balance, percent_of, percent_of_unit};
pub use weight::{
	CallOptions, DEFAULT_PROOF_SIZE, DEFAULT_REF_TIME, DEFAULT_STORAGE_DEPOSIT_LIMIT,
	build_gas_limit, default_call_options,
};
// External exports
pub use sp_weights::Weight;
pub use tokio_util::sync::CancellationToken;
