// SPDX-License-Identifier: GPL-3.0

use crate::units::{Balance, ONE_UNIT};
use sp_weights::Weight;

/// Default reference time for a contract call.
pub const DEFAULT_REF_TIME: u64 = (900_000_000 - 1) * 10;
/// Default proof size for a contract call.
pub const DEFAULT_PROOF_SIZE: u64 = 1_000_000;
/// Default limit on the storage deposit a contract call may charge.
pub const DEFAULT_STORAGE_DEPOSIT_LIMIT: Balance = ONE_UNIT;

/// Options attached to every mutating contract call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallOptions {
	/// Maximum balance that can be charged for storage.
	pub storage_deposit_limit: Balance,
	/// Maximum weight the call may consume.
	pub gas_limit: Weight,
}

impl Default for CallOptions {
	fn default() -> Self {
		default_call_options()
	}
}

impl CallOptions {
	/// Replaces the gas limit.
	pub fn with_gas_limit(mut self, gas_limit: Weight) -> Self {
		self.gas_limit = gas_limit;
		self
	}

	/// Replaces the storage deposit limit.
	pub fn with_storage_deposit_limit(mut self, limit: Balance) -> Self {
		self.storage_deposit_limit = limit;
		self
	}
}

/// Builds a gas limit, using the defaults for any value not provided.
///
/// # Arguments
/// * `ref_time` - Optional reference time.
/// * `proof_size` - Optional proof size.
pub fn build_gas_limit(ref_time: Option<u64>, proof_size: Option<u64>) -> Weight {
	Weight::from_parts(
		ref_time.unwrap_or(DEFAULT_REF_TIME),
		proof_size.unwrap_or(DEFAULT_PROOF_SIZE),
	)
}

/// The default options for a contract call.
pub fn default_call_options() -> CallOptions {
	CallOptions {
		storage_deposit_limit: DEFAULT_STORAGE_DEPOSIT_LIMIT,
		gas_limit: build_gas_limit(None, None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn build_gas_limit_uses_defaults() {
		let weight = build_gas_limit(None, None);
		assert_eq!(weight.ref_time(), 8_999_999_990);
		assert_eq!(weight.proof_size(), 1_000_000);
	}

	#[test]
	fn build_gas_limit_uses_overrides() {
		assert_eq!(build_gas_limit(Some(42), Some(7)), Weight::from_parts(42, 7));
		assert_eq!(build_gas_limit(Some(42), None), Weight::from_parts(42, DEFAULT_PROOF_SIZE));
		assert_eq!(build_gas_limit(None, Some(7)), Weight::from_parts(DEFAULT_REF_TIME, 7));
	}

	#[test]
	fn default_call_options_works() {
		let options = default_call_options();
		assert_eq!(options.storage_deposit_limit, 1_000_000_000_000_000_000);
		assert_eq!(options.gas_limit, Weight::from_parts(DEFAULT_REF_TIME, DEFAULT_PROOF_SIZE));
		assert_eq!(CallOptions::default(), options);
	}

	#[test]
	fn call_options_overrides_work() {
		let options = default_call_options()
			.with_gas_limit(Weight::from_parts(1, 2))
			.with_storage_deposit_limit(3);
		assert_eq!(
			options,
			CallOptions { storage_deposit_limit: 3, gas_limit: Weight::from_parts(1, 2) }
		);
	}
}
