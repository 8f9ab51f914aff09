// SPDX-License-Identifier: GPL-3.0

use crate::{
	config::{TxConfig, is_test_environment},
	errors::Error,
};
use log::{debug, warn};
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

/// A submitted transaction which can report whether it has been finalized.
#[async_trait::async_trait]
pub trait FinalizationStatus: Send + Sync {
	/// Whether the transaction has been finalized.
	///
	/// Implementations return an error once the transaction can no longer be finalized, e.g.
	/// when it was dropped from the pool or failed on chain.
	async fn is_finalized(&self) -> Result<bool, Error>;
}

/// Waits until `result` is finalized, according to the finalization policy of `config`.
///
/// Returns immediately in test mode.
///
/// # Arguments
/// * `result` - The submitted transaction.
/// * `config` - The helper configuration.
pub async fn await_finalization<T>(result: &T, config: &TxConfig) -> Result<(), Error>
where
	T: FinalizationStatus + ?Sized,
{
	await_finalization_with_cancel(result, config, &CancellationToken::new()).await
}

/// Waits until `result` is finalized, or until `cancel` is triggered.
///
/// # Arguments
/// * `result` - The submitted transaction.
/// * `config` - The helper configuration.
/// * `cancel` - Token aborting the wait.
pub async fn await_finalization_with_cancel<T>(
	result: &T,
	config: &TxConfig,
	cancel: &CancellationToken,
) -> Result<(), Error>
where
	T: FinalizationStatus + ?Sized,
{
	if is_test_environment(config) {
		debug!("Test environment, not waiting for finalization");
		return Ok(());
	}

	let policy = &config.finalization;
	let started = Instant::now();
	let mut interval = policy.poll_interval;
	let mut attempts: u32 = 0;
	loop {
		if cancel.is_cancelled() {
			return Err(Error::FinalizationCancelled);
		}
		attempts = attempts.saturating_add(1);
		if result.is_finalized().await? {
			debug!("Transaction finalized after {attempts} poll(s)");
			return Ok(());
		}

		let elapsed = started.elapsed();
		let out_of_attempts = policy.max_attempts.is_some_and(|max| attempts >= max);
		let out_of_time = policy.timeout.is_some_and(|timeout| elapsed >= timeout);
		if out_of_attempts || out_of_time {
			warn!("Giving up on finalization after {attempts} poll(s) ({elapsed:?})");
			return Err(Error::FinalizationTimeout { attempts, elapsed });
		}

		let delay = match policy.timeout {
			Some(timeout) => interval.min(timeout.saturating_sub(elapsed)),
			None => interval,
		};
		debug!("Transaction not finalized yet, polling again in {delay:?}");
		tokio::select! {
			_ = cancel.cancelled() => return Err(Error::FinalizationCancelled),
			_ = sleep(delay) => {},
		}
		interval = policy.next_interval(interval);
	}
}
