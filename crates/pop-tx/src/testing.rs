// SPDX-License-Identifier: GPL-3.0

//! In-memory doubles of a contract and its transactions, for testing code built on the helpers.

use crate::{
	contract::{ContractClient, DryRunOutcome},
	errors::Error,
	finalization::FinalizationStatus,
	weight::CallOptions,
};
use std::sync::{
	Arc, Mutex,
	atomic::{AtomicU32, Ordering},
};

/// A submitted transaction which becomes finalized after a number of polls.
#[derive(Clone, Debug, Default)]
pub struct MockTransaction {
	polls: Arc<AtomicU32>,
	pending_polls: Option<u32>,
	error: Option<String>,
}

impl MockTransaction {
	/// A transaction reported as not finalized for the first `polls` polls.
	pub fn finalized_after(polls: u32) -> Self {
		Self { pending_polls: Some(polls), ..Default::default() }
	}

	/// A transaction which is never finalized.
	pub fn never_finalized() -> Self {
		Self::default()
	}

	/// A transaction whose status check fails with `error`.
	pub fn failing(error: &str) -> Self {
		Self { error: Some(error.to_string()), ..Default::default() }
	}

	/// The number of times the finalization flag was read.
	pub fn polls(&self) -> u32 {
		self.polls.load(Ordering::SeqCst)
	}
}

#[async_trait::async_trait]
impl FinalizationStatus for MockTransaction {
	async fn is_finalized(&self) -> Result<bool, Error> {
		let previous = self.polls.fetch_add(1, Ordering::SeqCst);
		if let Some(error) = &self.error {
			return Err(Error::TransactionFailed(error.clone()));
		}
		Ok(self.pending_polls.is_some_and(|pending| previous >= pending))
	}
}

type Call = (String, Vec<String>);

/// A contract recording every simulated and submitted call.
#[derive(Debug)]
pub struct MockContract {
	name: String,
	dry_run: DryRunOutcome,
	query_error: Option<String>,
	tx_error: Option<String>,
	pending_polls: u32,
	queries: Mutex<Vec<Call>>,
	sent: Mutex<Vec<(String, Vec<String>, CallOptions)>>,
}

impl MockContract {
	/// A contract whose calls all succeed and finalize immediately.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.to_string(),
			dry_run: DryRunOutcome::success("Ok(())"),
			query_error: None,
			tx_error: None,
			pending_polls: 0,
			queries: Mutex::default(),
			sent: Mutex::default(),
		}
	}

	/// Simulations return `outcome`.
	pub fn with_dry_run(mut self, outcome: DryRunOutcome) -> Self {
		self.dry_run = outcome;
		self
	}

	/// Simulations fail with `error`.
	pub fn with_query_error(mut self, error: &str) -> Self {
		self.query_error = Some(error.to_string());
		self
	}

	/// Submissions fail with `error`.
	pub fn with_tx_error(mut self, error: &str) -> Self {
		self.tx_error = Some(error.to_string());
		self
	}

	/// Submitted transactions are finalized after `polls` polls.
	pub fn finalizing_after(mut self, polls: u32) -> Self {
		self.pending_polls = polls;
		self
	}

	/// The simulated calls, in order.
	pub fn queries(&self) -> Vec<Call> {
		self.queries.lock().unwrap_or_else(|e| e.into_inner()).clone()
	}

	/// The submitted calls, in order.
	pub fn sent(&self) -> Vec<(String, Vec<String>, CallOptions)> {
		self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
	}
}

#[async_trait::async_trait]
impl ContractClient for MockContract {
	type Submitted = MockTransaction;

	fn name(&self) -> &str {
		&self.name
	}

	async fn query(&self, method: &str, args: &[String]) -> Result<DryRunOutcome, Error> {
		self.queries
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push((method.to_string(), args.to_vec()));
		match &self.query_error {
			Some(error) => Err(Error::AnyhowError(anyhow::anyhow!(error.clone()))),
			None => Ok(self.dry_run.clone()),
		}
	}

	async fn tx(
		&self,
		method: &str,
		args: &[String],
		options: &CallOptions,
	) -> Result<Self::Submitted, Error> {
		if let Some(error) = &self.tx_error {
			return Err(Error::TransactionFailed(error.clone()));
		}
		self.sent.lock().unwrap_or_else(|e| e.into_inner()).push((
			method.to_string(),
			args.to_vec(),
			*options,
		));
		Ok(MockTransaction::finalized_after(self.pending_polls))
	}
}
