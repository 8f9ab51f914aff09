// SPDX-License-Identifier: GPL-3.0

use crate::{
	contract::{ContractClient, DryRunOutcome, error_payload},
	errors::Error,
	signer::create_signer,
	text::parse_hex_bytes,
	weight::CallOptions,
};
use anyhow::Context;
use contract_build::ManifestPath;
use contract_extrinsics::{
	BalanceVariant, CallCommandBuilder, CallExec, ContractArtifacts, ErrorVariant,
	ExtrinsicOptsBuilder, TokenMetadata, extrinsic_calls::Call,
};
use futures::{Stream, StreamExt};
use ink_env::{DefaultEnvironment, Environment};
use sp_weights::Weight;
use std::{
	path::{Path, PathBuf},
	str::FromStr,
};
use subxt::{
	OnlineClient, PolkadotConfig as DefaultConfig,
	tx::{TxProgress, TxStatus},
	utils::H160,
};
use subxt_signer::sr25519::Keypair;
use url::Url;

mod status;

pub use status::{CallStatus, SubmittedCall};

/// Attributes of a deployed ink! contract.
#[derive(Clone, Debug, PartialEq)]
pub struct InkContractOpts {
	/// Path to the contract bundle (`.contract`) or the contract project directory.
	pub path: PathBuf,
	/// The address of the contract.
	pub contract: String,
	/// Display name of the contract. Derived from `path` when not provided.
	pub name: Option<String>,
	/// Websocket endpoint of a node.
	pub url: Url,
	/// Secret key URI for the account calling the contract.
	pub suri: String,
	/// Balance transferred to the contract with every call.
	pub value: String,
}

/// A deployed ink! contract, called through a node.
pub struct InkContract {
	opts: InkContractOpts,
	name: String,
	address: H160,
	signer: Keypair,
	value: BalanceVariant<<DefaultEnvironment as Environment>::Balance>,
}

impl InkContract {
	/// Creates a new `InkContract`, validating the provided options.
	///
	/// # Arguments
	/// * `opts` - Attributes of the contract.
	pub fn new(opts: InkContractOpts) -> Result<Self, Error> {
		let signer = create_signer(&opts.suri)?;
		let address = parse_h160_account(&opts.contract)?;
		let value = BalanceVariant::from_str(&opts.value)
			.map_err(|e| Error::BalanceParsing(format!("{}", e)))?;
		let name = match &opts.name {
			Some(name) => name.clone(),
			None => contract_name(&opts.path),
		};
		Ok(Self { opts, name, address, signer, value })
	}

	/// The address of the contract.
	pub fn address(&self) -> &H160 {
		&self.address
	}

	// Prepare the preprocessed data for calling `message`.
	async fn set_up_call(
		&self,
		message: &str,
		args: &[String],
		gas_limit: Option<Weight>,
	) -> Result<CallExec<DefaultConfig, DefaultEnvironment, Keypair>, Error> {
		let extrinsic_opts = if self.opts.path.is_file() {
			let artifacts = ContractArtifacts::from_manifest_or_file(None, Some(&self.opts.path))?;
			ExtrinsicOptsBuilder::new(self.signer.clone())
				.file(Some(artifacts.artifact_path()))
				.url(self.opts.url.clone())
				.done()
		} else {
			let manifest_path = get_manifest_path(&self.opts.path)?;
			ExtrinsicOptsBuilder::new(self.signer.clone())
				.manifest_path(Some(manifest_path))
				.url(self.opts.url.clone())
				.done()
		};
		let token_metadata = TokenMetadata::query::<DefaultConfig>(&self.opts.url).await?;
		let call_exec = CallCommandBuilder::new(self.address, message, extrinsic_opts)
			.args(args.to_vec())
			.value(self.value.denominate_balance(&token_metadata)?)
			.gas_limit(gas_limit.map(|weight| weight.ref_time()))
			.proof_size(gas_limit.map(|weight| weight.proof_size()))
			.done()
			.await?;
		Ok(call_exec)
	}
}

#[async_trait::async_trait]
impl ContractClient for InkContract {
	type Submitted = SubmittedCall;

	fn name(&self) -> &str {
		&self.name
	}

	async fn query(&self, method: &str, args: &[String]) -> Result<DryRunOutcome, Error> {
		let call_exec = self.set_up_call(method, args, None).await?;
		let call_result = call_exec.call_dry_run().await?;
		match call_result.result {
			Ok(ref ret_val) => {
				let value = call_exec
					.transcoder()
					.decode_message_return(call_exec.message(), &mut &ret_val.data[..])
					.context(format!("Failed to decode return value {:?}", &ret_val))?
					.to_string();
				Ok(DryRunOutcome { error: error_payload(&value), output: Some(value) })
			},
			Err(ref err) => {
				let error_variant =
					ErrorVariant::from_dispatch_error(err, &call_exec.client().metadata())?;
				Ok(DryRunOutcome::failure(format!("{error_variant}")))
			},
		}
	}

	async fn tx(
		&self,
		method: &str,
		args: &[String],
		options: &CallOptions,
	) -> Result<Self::Submitted, Error> {
		let call_exec = self.set_up_call(method, args, Some(options.gas_limit)).await?;
		let payload = Call::new(
			*call_exec.contract(),
			call_exec.value(),
			options.gas_limit,
			&options.storage_deposit_limit,
			call_exec.call_data().clone(),
		)
		.build();
		let progress = call_exec
			.client()
			.tx()
			.sign_and_submit_then_watch_default(&payload, call_exec.opts().signer())
			.await
			.map_err(|e| Error::TransactionFailed(format!("{:?}", e)))?;
		let extrinsic_hash = format!("{:?}", progress.extrinsic_hash());
		Ok(SubmittedCall::track(extrinsic_hash, call_statuses(progress)))
	}
}

// Maps the progress of a submitted extrinsic into call statuses. A call only counts as
// finalized once its dispatch in the finalized block succeeded.
fn call_statuses(
	progress: TxProgress<DefaultConfig, OnlineClient<DefaultConfig>>,
) -> impl Stream<Item = CallStatus> + Send + 'static {
	progress.then(|status| async move {
		match status {
			Ok(TxStatus::InBestBlock(_)) => CallStatus::InBlock,
			Ok(TxStatus::InFinalizedBlock(in_block)) => match in_block.wait_for_success().await {
				Ok(_) => CallStatus::Finalized,
				Err(e) => CallStatus::Failed(format!("{:?}", e)),
			},
			Ok(TxStatus::Error { message }) |
			Ok(TxStatus::Invalid { message }) |
			Ok(TxStatus::Dropped { message }) => CallStatus::Failed(message),
			Ok(_) => CallStatus::Pending,
			Err(e) => CallStatus::Failed(format!("{:?}", e)),
		}
	})
}

/// Retrieves the manifest path for a contract project.
///
/// # Arguments
/// * `path` - A path to the project directory.
pub fn get_manifest_path(path: &Path) -> Result<ManifestPath, Error> {
	let full_path = PathBuf::from(path.to_string_lossy().to_string())
		.join("Cargo.toml")
		.canonicalize()?;
	ManifestPath::try_from(Some(full_path))
		.map_err(|e| Error::Config(format!("Failed to get manifest path: {e}")))
}

/// Parses a H160 account from its string representation.
///
/// # Arguments
/// * `account` - A hex-encoded string representation to parse.
pub fn parse_h160_account(account: &str) -> Result<H160, Error> {
	let bytes = parse_hex_bytes(account)
		.map_err(|e| Error::AccountAddressParsing(format!("Invalid hex: {}", e)))?;

	if bytes.len() != 20 {
		return Err(Error::AccountAddressParsing(format!(
			"H160 must be 20 bytes in length, got {}",
			bytes.len()
		)));
	}
	Ok(H160::from_slice(&bytes[..]))
}

// The contract name is the bundle's file stem, or the project directory name.
fn contract_name(path: &Path) -> String {
	let is_bundle = path.is_file() ||
		(!path.exists() && path.extension().is_some_and(|ext| ext == "contract"));
	let name = if is_bundle { path.file_stem() } else { path.file_name() };
	name.map(|name| name.to_string_lossy().to_string()).unwrap_or_else(|| "contract".into())
}
