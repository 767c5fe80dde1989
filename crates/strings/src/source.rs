use quarry_cache::DataSource;

use crate::error::SourceError;

/// Raw string datum as reported by a program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinedString {
	/// Rendered location of the datum.
	pub address: String,
	pub value: Option<String>,
	pub length: usize,
	pub type_name: Option<String>,
	pub symbol_name: Option<String>,
}

/// A loaded program whose defined strings can be enumerated.
///
/// The [`DataSource`] version must change whenever the set of defined strings, their values
/// or their labels change.
pub trait StringSource: DataSource {
	/// Display name used in log events.
	fn name(&self) -> &str;

	/// Enumerates every defined string datum in program order.
	fn defined_strings(&self) -> Result<Vec<DefinedString>, SourceError>;
}
