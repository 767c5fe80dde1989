use std::time::Duration;

use serde::Deserialize;

use crate::error::OptionsError;

/// Tunables for a [`crate::VersionedCache`].
///
/// ```toml
/// label = "strings"
/// slow-build-ms = 250
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CacheOptions {
	/// Name attached to every log event emitted by the cache.
	pub label: String,
	/// Builds taking at least this long are logged at `warn`.
	pub slow_build_ms: u64,
}

impl Default for CacheOptions {
	fn default() -> Self {
		Self {
			label: "cache".to_string(),
			slow_build_ms: 1_000,
		}
	}
}

impl CacheOptions {
	/// Options with the given label and default thresholds.
	pub fn labeled(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}

	/// Parses options from a TOML table. Missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, OptionsError> {
		Ok(toml::from_str(input)?)
	}

	pub fn slow_build_threshold(&self) -> Duration {
		Duration::from_millis(self.slow_build_ms)
	}
}
