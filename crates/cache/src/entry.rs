use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::source::{DataSource, SourceId};

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
#[inline]
pub(crate) fn saturating_millis(duration: Duration) -> u64 {
	u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Immutable artifact published by a rebuild.
pub struct CacheEntry<T> {
	items: Arc<[T]>,
	source_id: SourceId,
	source_version: u64,
	build_duration: Duration,
}

impl<T> CacheEntry<T> {
	pub(crate) fn new(
		items: Vec<T>,
		source_id: SourceId,
		source_version: u64,
		build_duration: Duration,
	) -> Self {
		Self {
			items: Arc::from(items),
			source_id,
			source_version,
			build_duration,
		}
	}

	/// Returns the derived items in builder order.
	#[inline]
	pub fn items(&self) -> &Arc<[T]> {
		&self.items
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Identity of the source this entry was built from.
	#[inline]
	pub fn source_id(&self) -> SourceId {
		self.source_id
	}

	/// Source version observed when the build started.
	#[inline]
	pub fn source_version(&self) -> u64 {
		self.source_version
	}

	#[inline]
	pub fn build_duration(&self) -> Duration {
		self.build_duration
	}

	#[inline]
	pub fn build_duration_ms(&self) -> u64 {
		saturating_millis(self.build_duration)
	}

	/// Returns true if this entry still reflects `source`.
	///
	/// Both identity and version must match: a reloaded source may restart its counter, and
	/// unrelated instances may coincidentally report equal versions.
	#[inline]
	pub fn is_valid_for<S: DataSource + ?Sized>(&self, source: &S) -> bool {
		self.source_id == source.source_id() && self.source_version == source.version()
	}
}

impl<T> fmt::Debug for CacheEntry<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CacheEntry")
			.field("len", &self.items.len())
			.field("source_id", &self.source_id)
			.field("source_version", &self.source_version)
			.field("build_duration", &self.build_duration)
			.finish()
	}
}
