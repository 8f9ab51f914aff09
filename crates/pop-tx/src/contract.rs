// SPDX-License-Identifier: GPL-3.0

use crate::{
	config::TxConfig,
	errors::Error,
	finalization::{FinalizationStatus, await_finalization},
	weight::{CallOptions, default_call_options},
};
use log::{debug, info};

/// Log target of the line reported once a transaction succeeded.
pub const LOG_TARGET: &str = "pop_tx";

/// Payloads which carry no error information, even though they are present.
const EMPTY_PAYLOADS: [&str; 4] = ["", "{}", "null", "()"];

/// Outcome of simulating a contract call without modifying the state of the blockchain.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DryRunOutcome {
	/// The decoded return value of the message, if any.
	pub output: Option<String>,
	/// The error reported by the simulation, if any.
	pub error: Option<String>,
}

impl DryRunOutcome {
	/// A successful simulation returning `output`.
	pub fn success(output: impl Into<String>) -> Self {
		Self { output: Some(output.into()), error: None }
	}

	/// A failed simulation reporting `error`.
	pub fn failure(error: impl Into<String>) -> Self {
		Self { output: None, error: Some(error.into()) }
	}

	/// The reported error, unless it is missing or empty.
	pub fn error_payload(&self) -> Option<&str> {
		self.error.as_deref().map(str::trim).filter(|error| !EMPTY_PAYLOADS.contains(error))
	}
}

/// A deployed contract whose messages can be simulated and submitted by name.
#[async_trait::async_trait]
pub trait ContractClient: Send + Sync {
	/// The handle of a submitted transaction.
	type Submitted: FinalizationStatus;

	/// Display name of the contract.
	fn name(&self) -> &str;

	/// Simulates calling `method` with `args`.
	async fn query(&self, method: &str, args: &[String]) -> Result<DryRunOutcome, Error>;

	/// Submits a transaction calling `method` with `args`.
	async fn tx(
		&self,
		method: &str,
		args: &[String],
		options: &CallOptions,
	) -> Result<Self::Submitted, Error>;
}

/// Simulates a contract call, failing if the simulation fails or reports an error.
///
/// # Arguments
/// * `contract` - The contract to call.
/// * `method` - The name of the contract message.
/// * `args` - The message arguments, encoded as strings.
pub async fn preview_call<C>(
	contract: &C,
	method: &str,
	args: &[String],
) -> Result<DryRunOutcome, Error>
where
	C: ContractClient + ?Sized,
{
	let reason = match contract.query(method, args).await {
		Ok(outcome) => match outcome.error_payload() {
			None => return Ok(outcome),
			Some(error) => error.to_string(),
		},
		Err(e) => e.to_string(),
	};
	debug!("Dry-run of {}.{method} failed: {reason}", contract.name());
	Err(Error::Preview {
		contract: contract.name().to_string(),
		method: method.to_string(),
		args: serialize_args(args),
		reason,
	})
}

/// Simulates a contract call and, if successful, submits it and waits for its finalization.
///
/// The transaction is only submitted when the simulation succeeds. Errors raised while
/// submitting or awaiting finalization are returned unchanged.
///
/// # Arguments
/// * `contract` - The contract to call.
/// * `method` - The name of the contract message.
/// * `args` - The message arguments, encoded as strings.
/// * `options` - Gas and storage deposit limits of the call.
/// * `config` - The helper configuration.
pub async fn preview_and_send<C>(
	contract: &C,
	method: &str,
	args: &[String],
	options: &CallOptions,
	config: &TxConfig,
) -> Result<C::Submitted, Error>
where
	C: ContractClient + ?Sized,
{
	preview_call(contract, method, args).await?;
	let submitted = contract.tx(method, args, options).await?;
	await_finalization(&submitted, config).await?;
	info!(target: LOG_TARGET, "{}", success_message(contract.name(), method, args));
	Ok(submitted)
}

/// [`preview_and_send`] using [`default_call_options`].
pub async fn preview_and_send_with_defaults<C>(
	contract: &C,
	method: &str,
	args: &[String],
	config: &TxConfig,
) -> Result<C::Submitted, Error>
where
	C: ContractClient + ?Sized,
{
	preview_and_send(contract, method, args, &default_call_options(), config).await
}

/// The line reported once a transaction succeeded. The last argument is left out.
///
/// # Arguments
/// * `contract` - Display name of the contract.
/// * `method` - The name of the contract message.
/// * `args` - The message arguments.
pub fn success_message(contract: &str, method: &str, args: &[String]) -> String {
	let shown = args.split_last().map(|(_, rest)| rest).unwrap_or_default();
	format!("Transaction succeeded: {contract}.{method}({})", serialize_args(shown))
}

/// Extracts the error from a rendered message return value, e.g. `Ok(Err(InsufficientCash))`.
///
/// # Arguments
/// * `rendered` - The decoded return value.
pub fn error_payload(rendered: &str) -> Option<String> {
	let mut value = rendered.trim();
	while let Some(inner) = value.strip_prefix("Ok(").and_then(|v| v.strip_suffix(')')) {
		value = inner.trim();
	}
	value.starts_with("Err(").then(|| value.to_string())
}

fn serialize_args(args: &[String]) -> String {
	serde_json::to_string(args).unwrap_or_else(|_| format!("{args:?}"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MockContract;
	use anyhow::Result;
	use log::{LevelFilter, Log, Metadata, Record};
	use std::{
		sync::{Mutex, Once},
		thread::{self, ThreadId},
	};

	// Records log lines per test thread, as tests share the global logger.
	struct CapturingLogger {
		lines: Mutex<Vec<(ThreadId, String, String)>>,
	}

	static LOGGER: CapturingLogger = CapturingLogger { lines: Mutex::new(Vec::new()) };

	impl Log for CapturingLogger {
		fn enabled(&self, _: &Metadata) -> bool {
			true
		}

		fn log(&self, record: &Record) {
			let line =
				(thread::current().id(), record.target().to_string(), record.args().to_string());
			self.lines.lock().unwrap_or_else(|e| e.into_inner()).push(line);
		}

		fn flush(&self) {}
	}

	fn capture_logs() {
		static INIT: Once = Once::new();
		INIT.call_once(|| {
			log::set_logger(&LOGGER).expect("no other logger in unit tests");
			log::set_max_level(LevelFilter::Info);
		});
	}

	fn captured_lines() -> Vec<(String, String)> {
		let current = thread::current().id();
		LOGGER
			.lines
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.iter()
			.filter(|(thread, ..)| *thread == current)
			.map(|(_, target, line)| (target.clone(), line.clone()))
			.collect()
	}

	fn args(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| v.to_string()).collect()
	}

	#[test]
	fn error_payload_of_outcome_ignores_empty_errors() {
		assert_eq!(DryRunOutcome::success("Ok(())").error_payload(), None);
		assert_eq!(DryRunOutcome::failure("").error_payload(), None);
		assert_eq!(DryRunOutcome::failure(" {} ").error_payload(), None);
		assert_eq!(DryRunOutcome::failure("null").error_payload(), None);
		assert_eq!(DryRunOutcome::failure("Module error").error_payload(), Some("Module error"));
	}

	#[test]
	fn error_payload_detects_nested_errors() {
		assert_eq!(error_payload("Ok(())"), None);
		assert_eq!(error_payload("Ok(Ok(42))"), None);
		assert_eq!(error_payload("42"), None);
		assert_eq!(error_payload("Err(CouldNotReadInput)"), Some("Err(CouldNotReadInput)".into()));
		assert_eq!(
			error_payload("Ok(Err(InsufficientCash))"),
			Some("Err(InsufficientCash)".into())
		);
	}

	#[test]
	fn success_message_excludes_last_argument() {
		assert_eq!(
			success_message("pool", "mint", &args(&["100", "0xdead"])),
			r#"Transaction succeeded: pool.mint(["100"])"#
		);
		assert_eq!(
			success_message("pool", "accrue", &[]),
			"Transaction succeeded: pool.accrue([])"
		);
	}

	#[tokio::test]
	async fn preview_and_send_submits_same_arguments() -> Result<()> {
		let contract = MockContract::new("controller");
		let call_args = args(&["5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY", "1000"]);
		let options = default_call_options();
		preview_and_send(&contract, "mint_allowed", &call_args, &options, &TxConfig::test())
			.await?;
		assert_eq!(contract.queries(), vec![("mint_allowed".to_string(), call_args.clone())]);
		assert_eq!(contract.sent(), vec![("mint_allowed".to_string(), call_args, options)]);
		Ok(())
	}

	#[tokio::test]
	async fn success_line_is_logged_once_and_only_on_success() -> Result<()> {
		capture_logs();
		let contract = MockContract::new("pool");
		preview_and_send_with_defaults(
			&contract,
			"transfer",
			&args(&["alice", "100"]),
			&TxConfig::test(),
		)
		.await?;
		let rejected =
			MockContract::new("pool").with_dry_run(DryRunOutcome::failure("Err(Denied)"));
		let config = TxConfig::test();
		let result =
			preview_and_send_with_defaults(&rejected, "transfer", &args(&["bob"]), &config).await;
		assert!(result.is_err());
		assert_eq!(
			captured_lines(),
			vec![(
				LOG_TARGET.to_string(),
				r#"Transaction succeeded: pool.transfer(["alice"])"#.to_string()
			)]
		);
		Ok(())
	}

	#[tokio::test]
	async fn preview_error_prevents_submission() {
		let contract = MockContract::new("pool").with_dry_run(DryRunOutcome::failure(
			"Err(BorrowCashNotAvailable)",
		));
		let result =
			preview_and_send_with_defaults(&contract, "borrow", &args(&["10"]), &TxConfig::test())
				.await;
		match result {
			Err(Error::Preview { contract: name, method, args, reason }) => {
				assert_eq!(name, "pool");
				assert_eq!(method, "borrow");
				assert_eq!(args, r#"["10"]"#);
				assert_eq!(reason, "Err(BorrowCashNotAvailable)");
			},
			other => panic!("unexpected result: {other:?}"),
		}
		assert!(contract.sent().is_empty());
	}

	#[tokio::test]
	async fn preview_failure_is_wrapped() {
		let contract = MockContract::new("pool").with_query_error("connection refused");
		let error =
			preview_and_send_with_defaults(&contract, "repay_borrow", &[], &TxConfig::test())
				.await
				.unwrap_err();
		let message = error.to_string();
		assert!(message.contains("pool"));
		assert!(message.contains("repay_borrow"));
		assert!(message.contains("connection refused"));
		assert!(contract.sent().is_empty());
	}

	#[tokio::test]
	async fn empty_error_payload_does_not_block_submission() -> Result<()> {
		let contract = MockContract::new("pool").with_dry_run(DryRunOutcome::failure("{}"));
		preview_and_send_with_defaults(&contract, "redeem", &args(&["1"]), &TxConfig::test())
			.await?;
		assert_eq!(contract.sent().len(), 1);
		Ok(())
	}

	#[tokio::test]
	async fn send_errors_propagate_unchanged() {
		let contract = MockContract::new("pool").with_tx_error("priority too low");
		let result =
			preview_and_send_with_defaults(&contract, "mint", &args(&["1"]), &TxConfig::test())
				.await;
		assert!(matches!(result, Err(Error::TransactionFailed(msg)) if msg == "priority too low"));
	}

	#[tokio::test(start_paused = true)]
	async fn live_mode_waits_for_finalization() -> Result<()> {
		let contract = MockContract::new("pool").finalizing_after(2);
		let submitted =
			preview_and_send_with_defaults(&contract, "mint", &args(&["1"]), &TxConfig::default())
				.await?;
		assert_eq!(submitted.polls(), 3);
		Ok(())
	}
}
