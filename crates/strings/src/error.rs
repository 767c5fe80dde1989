use thiserror::Error;

/// A [`crate::StringSource`] could not enumerate its defined strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to read defined strings from {source_name}: {message}")]
pub struct SourceError {
	pub source_name: String,
	pub message: String,
}

impl SourceError {
	pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			source_name: source_name.into(),
			message: message.into(),
		}
	}
}

/// Errors returned by [`crate::StringIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StringError {
	#[error(transparent)]
	Source(#[from] SourceError),

	/// A query asked for pages of zero items.
	#[error("query limit must be greater than zero")]
	InvalidLimit,
}
