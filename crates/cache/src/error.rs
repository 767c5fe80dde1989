//! Error types for cache configuration.

use thiserror::Error;

/// Errors that can occur when parsing [`crate::CacheOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
	/// The TOML document was malformed or contained unknown keys.
	#[error("invalid cache options: {0}")]
	Toml(#[from] toml::de::Error),
}
