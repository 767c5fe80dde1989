use serde::Serialize;

use crate::source::DefinedString;

/// Immutable record for one defined string.
///
/// Values that are expensive to obtain from the program (the rendered value, the primary
/// symbol) are captured once per build, together with a lowercase copy of the value used by
/// case-insensitive filters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StringInfo {
	address: Box<str>,
	value: Box<str>,
	#[serde(skip)]
	value_lower: Box<str>,
	length: usize,
	type_name: Box<str>,
	symbol_name: Box<str>,
}

impl StringInfo {
	pub fn new(
		address: impl Into<Box<str>>,
		value: Option<&str>,
		length: usize,
		type_name: Option<&str>,
		symbol_name: Option<&str>,
	) -> Self {
		let value = value.unwrap_or_default();
		Self {
			address: address.into(),
			value_lower: value.to_lowercase().into_boxed_str(),
			value: value.into(),
			length,
			type_name: type_name.unwrap_or_default().into(),
			symbol_name: symbol_name.unwrap_or_default().into(),
		}
	}

	#[inline]
	pub fn address(&self) -> &str {
		&self.address
	}

	/// Default value representation; empty when the program had none.
	#[inline]
	pub fn value(&self) -> &str {
		&self.value
	}

	#[inline]
	pub fn value_lower(&self) -> &str {
		&self.value_lower
	}

	/// Size of the datum in bytes.
	#[inline]
	pub fn length(&self) -> usize {
		self.length
	}

	#[inline]
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Primary symbol at the address; empty when unlabeled.
	#[inline]
	pub fn symbol_name(&self) -> &str {
		&self.symbol_name
	}

	/// Returns true if `needle_lower` (already lowercased) occurs in the value.
	#[inline]
	pub fn contains_lower(&self, needle_lower: &str) -> bool {
		self.value_lower.contains(needle_lower)
	}
}

impl From<DefinedString> for StringInfo {
	fn from(raw: DefinedString) -> Self {
		Self::new(
			raw.address,
			raw.value.as_deref(),
			raw.length,
			raw.type_name.as_deref(),
			raw.symbol_name.as_deref(),
		)
	}
}
