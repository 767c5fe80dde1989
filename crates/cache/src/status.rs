use serde::Serialize;

use crate::entry::CacheEntry;
use crate::source::DataSource;

/// Diagnostic snapshot of a cache slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
	/// Whether an entry is present.
	pub cached: bool,
	/// Number of items in the entry.
	pub size: usize,
	pub build_duration_ms: u64,
	/// Whether the entry is valid for the queried source.
	pub valid: bool,
	/// Source version stamped on the entry.
	pub source_version: u64,
}

impl CacheStatus {
	/// Status reported when there is no entry or no source to check against.
	pub const EMPTY: Self = Self {
		cached: false,
		size: 0,
		build_duration_ms: 0,
		valid: false,
		source_version: 0,
	};

	/// Derives every field from one entry reference.
	pub(crate) fn of<T, S>(entry: Option<&CacheEntry<T>>, source: &S) -> Self
	where
		S: DataSource + ?Sized,
	{
		let Some(entry) = entry else {
			return Self::EMPTY;
		};
		Self {
			cached: true,
			size: entry.len(),
			build_duration_ms: entry.build_duration_ms(),
			valid: entry.is_valid_for(source),
			source_version: entry.source_version(),
		}
	}
}
