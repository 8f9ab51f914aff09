// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use serde::Deserialize;
use std::{env, fs, path::Path, str::FromStr, time::Duration};

/// Environment variable selecting the environment the helpers run in.
pub const ENV_MODE: &str = "POP_TX_ENV";
/// Environment variable overriding the finalization poll interval, in milliseconds.
pub const ENV_POLL_INTERVAL_MS: &str = "POP_TX_POLL_INTERVAL_MS";
/// Environment variable overriding the maximum number of finalization polls.
pub const ENV_MAX_ATTEMPTS: &str = "POP_TX_MAX_ATTEMPTS";
/// Environment variable overriding the finalization timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "POP_TX_TIMEOUT_MS";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);
const DEFAULT_MAX_INTERVAL: Duration = Duration::from_millis(60_000);
const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// The environment the helpers run in.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	/// Transactions are submitted to a live node and awaited until finalized.
	#[default]
	Live,
	/// Finalization is not awaited.
	Test,
}

/// How long and how often to poll a submitted transaction for finalization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinalizationPolicy {
	/// Delay before the first re-check of the finalization flag.
	pub poll_interval: Duration,
	/// Multiplier applied to the delay after every unsuccessful poll. `1` keeps it fixed.
	pub backoff: u32,
	/// Upper bound for the delay between two polls.
	pub max_interval: Duration,
	/// Maximum number of polls before giving up. `None` means no limit.
	pub max_attempts: Option<u32>,
	/// Maximum total time to wait before giving up. `None` means no limit.
	pub timeout: Option<Duration>,
}

impl Default for FinalizationPolicy {
	fn default() -> Self {
		Self {
			poll_interval: DEFAULT_POLL_INTERVAL,
			backoff: 1,
			max_interval: DEFAULT_MAX_INTERVAL,
			max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
			timeout: None,
		}
	}
}

impl FinalizationPolicy {
	/// A policy that polls at a fixed interval until the transaction is finalized.
	pub fn unbounded(poll_interval: Duration) -> Self {
		Self {
			poll_interval,
			backoff: 1,
			max_interval: poll_interval,
			max_attempts: None,
			timeout: None,
		}
	}

	/// Returns the delay to use after `current`, applying the backoff and its cap.
	pub fn next_interval(&self, current: Duration) -> Duration {
		current.saturating_mul(self.backoff.max(1)).min(self.max_interval.max(self.poll_interval))
	}
}

/// Configuration passed explicitly to the transaction helpers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TxConfig {
	/// The environment the helpers run in.
	pub mode: Mode,
	/// Finalization polling policy.
	pub finalization: FinalizationPolicy,
}

impl TxConfig {
	/// A configuration for tests, where finalization is never awaited.
	pub fn test() -> Self {
		Self { mode: Mode::Test, ..Default::default() }
	}

	/// Builds the configuration from `POP_TX_*` environment variables, falling back to defaults.
	pub fn from_env() -> Result<Self, Error> {
		let mut config = Self::default();
		if let Ok(mode) = env::var(ENV_MODE) {
			config.mode =
				if mode.trim().eq_ignore_ascii_case("test") { Mode::Test } else { Mode::Live };
		}
		if let Some(ms) = read_env::<u64>(ENV_POLL_INTERVAL_MS)? {
			config.finalization.poll_interval = Duration::from_millis(ms);
		}
		if let Some(attempts) = read_env::<u32>(ENV_MAX_ATTEMPTS)? {
			config.finalization.max_attempts = Some(attempts);
		}
		if let Some(ms) = read_env::<u64>(ENV_TIMEOUT_MS)? {
			config.finalization.timeout = Some(Duration::from_millis(ms));
		}
		Ok(config)
	}

	/// Loads the configuration from a TOML file.
	///
	/// # Arguments
	/// * `path` - Path to the configuration file.
	pub fn from_path(path: &Path) -> Result<Self, Error> {
		let contents = fs::read_to_string(path)?;
		Self::from_toml(&contents)
	}

	/// Parses the configuration from TOML. Missing keys take their default values.
	///
	/// ```toml
	/// mode = "live"
	///
	/// [finalization]
	/// poll_interval_ms = 10000
	/// backoff = 2
	/// max_interval_ms = 60000
	/// max_attempts = 30
	/// timeout_ms = 600000
	/// ```
	pub fn from_toml(contents: &str) -> Result<Self, Error> {
		let file: ConfigFile = toml::from_str(contents)
			.map_err(|e| Error::Config(format!("Failed to parse configuration: {e}")))?;
		let defaults = FinalizationPolicy::default();
		let policy = file.finalization.unwrap_or_default();
		let finalization = FinalizationPolicy {
			poll_interval: policy
				.poll_interval_ms
				.map(Duration::from_millis)
				.unwrap_or(defaults.poll_interval),
			backoff: policy.backoff.unwrap_or(defaults.backoff),
			max_interval: policy
				.max_interval_ms
				.map(Duration::from_millis)
				.unwrap_or(defaults.max_interval),
			max_attempts: policy.max_attempts.or(defaults.max_attempts),
			timeout: policy.timeout_ms.map(Duration::from_millis).or(defaults.timeout),
		};
		if finalization.backoff == 0 {
			return Err(Error::Config("`backoff` must be at least 1".to_string()));
		}
		Ok(Self { mode: file.mode.unwrap_or_default(), finalization })
	}
}

/// Whether the helpers are configured to run in test mode.
///
/// # Arguments
/// * `config` - The helper configuration.
pub fn is_test_environment(config: &TxConfig) -> bool {
	config.mode == Mode::Test
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	mode: Option<Mode>,
	finalization: Option<PolicyFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
	poll_interval_ms: Option<u64>,
	backoff: Option<u32>,
	max_interval_ms: Option<u64>,
	max_attempts: Option<u32>,
	timeout_ms: Option<u64>,
}

fn read_env<T: FromStr>(key: &str) -> Result<Option<T>, Error>
where
	T::Err: std::fmt::Display,
{
	match env::var(key) {
		Ok(value) => value
			.trim()
			.parse::<T>()
			.map(Some)
			.map_err(|e| Error::Config(format!("Invalid value for {key}: {e}"))),
		Err(_) => Ok(None),
	}
}
