// SPDX-License-Identifier: GPL-3.0

use crate::{errors::Error, finalization::FinalizationStatus};
use futures::{Stream, StreamExt};
use log::debug;
use tokio::{sync::watch, task::JoinHandle};

/// Progress of a submitted contract call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallStatus {
	/// Submitted, not yet included in a block.
	Pending,
	/// Included in a best block.
	InBlock,
	/// Included in a finalized block and executed successfully.
	Finalized,
	/// The call can no longer be finalized.
	Failed(String),
}

impl CallStatus {
	fn is_terminal(&self) -> bool {
		matches!(self, CallStatus::Finalized | CallStatus::Failed(_))
	}
}

/// A submitted contract call whose status is kept up to date in the background.
#[derive(Debug)]
pub struct SubmittedCall {
	extrinsic_hash: String,
	status: watch::Receiver<CallStatus>,
	task: JoinHandle<()>,
}

impl SubmittedCall {
	/// Tracks a call by following `updates` until a terminal status is reached.
	///
	/// If `updates` ends before that, the call is reported as failed.
	///
	/// # Arguments
	/// * `extrinsic_hash` - Hash of the submitted extrinsic.
	/// * `updates` - Status updates of the call.
	pub fn track<S>(extrinsic_hash: String, updates: S) -> Self
	where
		S: Stream<Item = CallStatus> + Send + 'static,
	{
		let (sender, status) = watch::channel(CallStatus::Pending);
		let hash = extrinsic_hash.clone();
		let task = tokio::spawn(async move {
			let mut updates = Box::pin(updates);
			while let Some(update) = updates.next().await {
				debug!("Extrinsic {hash}: {update:?}");
				let terminal = update.is_terminal();
				sender.send_replace(update);
				if terminal {
					return;
				}
			}
			sender.send_replace(CallStatus::Failed("status updates ended unexpectedly".into()));
		});
		Self { extrinsic_hash, status, task }
	}

	/// Hash of the submitted extrinsic.
	pub fn extrinsic_hash(&self) -> &str {
		&self.extrinsic_hash
	}

	/// The latest known status.
	pub fn status(&self) -> CallStatus {
		self.status.borrow().clone()
	}
}

impl Drop for SubmittedCall {
	fn drop(&mut self) {
		self.task.abort();
	}
}

#[async_trait::async_trait]
impl FinalizationStatus for SubmittedCall {
	async fn is_finalized(&self) -> Result<bool, Error> {
		match self.status() {
			CallStatus::Finalized => Ok(true),
			CallStatus::Failed(reason) => Err(Error::TransactionFailed(reason)),
			CallStatus::Pending | CallStatus::InBlock => Ok(false),
		}
	}
}
