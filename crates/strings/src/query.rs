use serde::{Deserialize, Serialize};

use crate::error::StringError;
use crate::info::StringInfo;

/// Page size used when a query does not specify one.
pub const DEFAULT_LIMIT: usize = 2_000;

/// Pagination and filter parameters for a string listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StringQuery {
	pub offset: usize,
	pub limit: usize,
	/// Case-insensitive substring of the value. Empty matches everything.
	pub filter: Option<String>,
}

impl Default for StringQuery {
	fn default() -> Self {
		Self {
			offset: 0,
			limit: DEFAULT_LIMIT,
			filter: None,
		}
	}
}

impl StringQuery {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_offset(mut self, offset: usize) -> Self {
		self.offset = offset;
		self
	}

	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = Some(filter.into());
		self
	}

	pub fn validate(&self) -> Result<(), StringError> {
		if self.limit == 0 {
			return Err(StringError::InvalidLimit);
		}
		Ok(())
	}

	/// Selects the page of `items` this query describes.
	///
	/// `total` counts every match, so callers can page past the end and still learn how
	/// many strings matched.
	pub fn apply(&self, items: &[StringInfo]) -> Result<StringPage, StringError> {
		self.validate()?;

		let needle = self
			.filter
			.as_deref()
			.filter(|f| !f.is_empty())
			.map(str::to_lowercase);

		let mut total = 0;
		let mut page = Vec::with_capacity(self.limit.min(items.len()));
		for info in items
			.iter()
			.filter(|info| needle.as_deref().is_none_or(|n| info.contains_lower(n)))
		{
			if total >= self.offset && page.len() < self.limit {
				page.push(info.clone());
			}
			total += 1;
		}

		Ok(StringPage {
			items: page,
			total,
			offset: self.offset,
			limit: self.limit,
		})
	}
}

/// One page of a string listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StringPage {
	pub items: Vec<StringInfo>,
	/// Matches before pagination.
	pub total: usize,
	pub offset: usize,
	pub limit: usize,
}

impl StringPage {
	#[inline]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Returns true if matches remain past this page.
	pub fn has_more(&self) -> bool {
		self.offset.saturating_add(self.items.len()) < self.total
	}
}
