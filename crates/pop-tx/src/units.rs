// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use ink_env::{DefaultEnvironment, Environment};

/// Balance type of the contracts environment, in its smallest denomination.
pub type Balance = <DefaultEnvironment as Environment>::Balance;

/// One whole token (`10^18` of the smallest denomination).
pub const ONE_UNIT: Balance = 1_000_000_000_000_000_000;

/// Returns `value` percent of one whole token.
///
/// # Arguments
/// * `value` - The percentage, e.g. `50` for half a token.
pub fn percent_of(value: Balance) -> Result<Balance, Error> {
	percent_of_unit(value, ONE_UNIT)
}

/// Returns `value` percent of `unit`, truncating any remainder.
///
/// # Arguments
/// * `value` - The percentage.
/// * `unit` - The base amount the percentage is taken of.
pub fn percent_of_unit(value: Balance, unit: Balance) -> Result<Balance, Error> {
	// unit * value / 100, split so that only results which do not fit overflow.
	let rest = unit % 100;
	(unit / 100)
		.checked_mul(value)
		.and_then(|amount| amount.checked_add(rest * (value / 100)))
		.and_then(|amount| amount.checked_add(rest * (value % 100) / 100))
		.ok_or_else(|| Error::Overflow(format!("{value}% of {unit} does not fit in a balance")))
}

/// Parses a balance in its smallest denomination from a decimal string.
///
/// # Arguments
/// * `balance` - A string representing the balance value to parse.
pub fn parse_balance(balance: &str) -> Result<Balance, Error> {
	balance
		.trim()
		.replace('_', "")
		.parse::<Balance>()
		.map_err(|e| Error::BalanceParsing(format!("{balance}: {e}")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn percent_of_hundred_is_one_unit() -> Result<(), Error> {
		assert_eq!(percent_of(100)?, ONE_UNIT);
		assert_eq!(percent_of(50)?, ONE_UNIT / 2);
		assert_eq!(percent_of(250)?, 2 * ONE_UNIT + ONE_UNIT / 2);
		Ok(())
	}

	#[test]
	fn percent_of_zero_is_zero() -> Result<(), Error> {
		assert_eq!(percent_of(0)?, 0);
		Ok(())
	}

	#[test]
	fn percent_of_unit_truncates() -> Result<(), Error> {
		assert_eq!(percent_of_unit(1, 150)?, 1);
		assert_eq!(percent_of_unit(1, 199)?, 1);
		assert_eq!(percent_of_unit(33, 100)?, 33);
		assert_eq!(percent_of_unit(1, 99)?, 0);
		Ok(())
	}

	#[test]
	fn percent_of_fails_on_overflow() {
		assert!(matches!(percent_of(Balance::MAX), Err(Error::Overflow(..))));
		assert!(matches!(percent_of_unit(Balance::MAX, 200), Err(Error::Overflow(..))));
	}

	#[test]
	fn percent_of_large_unit_does_not_overflow() -> Result<(), Error> {
		assert_eq!(percent_of_unit(1, Balance::MAX)?, Balance::MAX / 100);
		assert_eq!(percent_of_unit(100, Balance::MAX)?, Balance::MAX);
		assert_eq!(percent_of_unit(50, Balance::MAX)?, Balance::MAX / 2);
		assert_eq!(percent_of_unit(Balance::MAX, 99)?, Balance::MAX / 100 * 99 + 54);
		Ok(())
	}

	#[test]
	fn parse_balance_works() -> Result<(), Error> {
		assert_eq!(parse_balance("100000")?, 100_000);
		assert_eq!(parse_balance("1_000_000_000_000_000_000")?, ONE_UNIT);
		Ok(())
	}

	#[test]
	fn parse_balance_fails_wrong_balance() {
		assert!(matches!(parse_balance("wrongbalance"), Err(Error::BalanceParsing(..))));
		assert!(matches!(parse_balance("-1"), Err(Error::BalanceParsing(..))));
	}
}
