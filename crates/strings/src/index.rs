use std::sync::Arc;

use quarry_cache::{CacheOptions, CacheStats, CacheStatus, VersionedCache};

use crate::error::StringError;
use crate::info::StringInfo;
use crate::query::{StringPage, StringQuery};
use crate::source::StringSource;

/// Builds the string list for `source`, preserving program order.
pub fn collect_strings<S>(source: &S) -> Result<Vec<StringInfo>, StringError>
where
	S: StringSource + ?Sized,
{
	tracing::info!(program = source.name(), "strings.collect");
	let raw = source.defined_strings()?;
	Ok(raw.into_iter().map(StringInfo::from).collect())
}

/// String listing service backed by a versioned snapshot.
#[derive(Debug)]
pub struct StringIndex {
	cache: VersionedCache<StringInfo>,
}

impl StringIndex {
	pub fn new() -> Self {
		Self::with_options(CacheOptions::labeled("strings"))
	}

	pub fn with_options(options: CacheOptions) -> Self {
		Self {
			cache: VersionedCache::with_options(options),
		}
	}

	/// Returns every defined string of `source`, collecting only if the snapshot is stale.
	pub fn strings<S>(&self, source: &S) -> Result<Arc<[StringInfo]>, StringError>
	where
		S: StringSource + ?Sized,
	{
		self.cache.get_or_build(source, collect_strings::<S>)
	}

	/// Returns the page of strings selected by `query`.
	///
	/// An invalid query is rejected before any collection work starts.
	pub fn list<S>(&self, source: &S, query: &StringQuery) -> Result<StringPage, StringError>
	where
		S: StringSource + ?Sized,
	{
		query.validate()?;
		let strings = self.strings(source)?;
		query.apply(&strings)
	}

	pub fn invalidate(&self) {
		self.cache.invalidate();
	}

	pub fn status<S>(&self, source: Option<&S>) -> CacheStatus
	where
		S: StringSource + ?Sized,
	{
		self.cache.status(source)
	}

	pub fn stats(&self) -> CacheStats {
		self.cache.stats()
	}

	pub fn cache(&self) -> &VersionedCache<StringInfo> {
		&self.cache
	}
}

impl Default for StringIndex {
	fn default() -> Self {
		Self::new()
	}
}
