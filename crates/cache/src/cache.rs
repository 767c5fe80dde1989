//! Single-slot cache with double-checked rebuilds.
//!
//! # Role
//!
//! Readers load the slot without locking. Only a reader that finds no valid entry takes the
//! build lock, re-checks, and if still stale runs the builder and publishes a fresh entry.
//!
//! # Invariants
//!
//! - The fast path never touches `build_lock` (see
//!   `invariants::test_fast_path_does_not_block_on_build`).
//! - The source version is captured before the builder runs; a mutation during the build
//!   leaves the published entry stale, so the next call rebuilds (see
//!   `invariants::test_version_captured_at_build_start`).

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use crate::entry::{CacheEntry, saturating_millis};
use crate::options::CacheOptions;
use crate::source::DataSource;
use crate::stats::{CacheStats, StatsCell};
use crate::status::CacheStatus;

/// Thread-safe cache holding at most one artifact derived from a [`DataSource`].
pub struct VersionedCache<T> {
	entry: ArcSwapOption<CacheEntry<T>>,
	build_lock: Mutex<()>,
	stats: StatsCell,
	options: CacheOptions,
}

impl<T> VersionedCache<T> {
	pub fn new() -> Self {
		Self::with_options(CacheOptions::default())
	}

	pub fn with_options(options: CacheOptions) -> Self {
		Self {
			entry: ArcSwapOption::new(None),
			build_lock: Mutex::new(()),
			stats: StatsCell::default(),
			options,
		}
	}

	#[inline]
	pub fn options(&self) -> &CacheOptions {
		&self.options
	}

	/// Returns the items valid for `source`, running `build` if the slot is stale.
	///
	/// Concurrent callers that find the slot stale queue on the build lock; the first one
	/// builds and the rest observe its entry on the locked re-check. A builder error is
	/// returned to the caller that ran it and nothing is published.
	pub fn get_or_build<S, F, E>(&self, source: &S, build: F) -> Result<Arc<[T]>, E>
	where
		S: DataSource + ?Sized,
		F: FnOnce(&S) -> Result<Vec<T>, E>,
	{
		if let Some(items) = self.valid_items(source) {
			return Ok(items);
		}

		let _guard = self.build_lock.lock();

		if let Some(items) = self.valid_items(source) {
			return Ok(items);
		}

		let entry = self.rebuild(source, build)?;
		Ok(Arc::clone(entry.items()))
	}

	/// Drops the current entry so the next read rebuilds.
	///
	/// Does not wait for an in-flight build; if one is running it still publishes.
	pub fn invalidate(&self) {
		let previous = self.entry.swap(None);
		self.stats.record_invalidation();
		tracing::debug!(
			cache = %self.options.label,
			had_entry = previous.is_some(),
			"cache.invalidate"
		);
	}

	/// Reports the slot state relative to `source`.
	///
	/// `None` stands for an absent source, against which nothing can be cached.
	pub fn status<S>(&self, source: Option<&S>) -> CacheStatus
	where
		S: DataSource + ?Sized,
	{
		let Some(source) = source else {
			return CacheStatus::EMPTY;
		};
		let current = self.entry.load();
		CacheStatus::of(current.as_deref(), source)
	}

	/// Pins the current entry, if any.
	#[inline]
	pub fn current(&self) -> Option<Arc<CacheEntry<T>>> {
		self.entry.load_full()
	}

	pub fn stats(&self) -> CacheStats {
		self.stats.snapshot()
	}

	fn valid_items<S>(&self, source: &S) -> Option<Arc<[T]>>
	where
		S: DataSource + ?Sized,
	{
		let current = self.entry.load();
		match &*current {
			Some(entry) if entry.is_valid_for(source) => {
				self.stats.record_hit();
				Some(Arc::clone(entry.items()))
			}
			_ => None,
		}
	}

	/// Runs the builder and publishes its result. Caller must hold `build_lock`.
	fn rebuild<S, F, E>(&self, source: &S, build: F) -> Result<Arc<CacheEntry<T>>, E>
	where
		S: DataSource + ?Sized,
		F: FnOnce(&S) -> Result<Vec<T>, E>,
	{
		let label = self.options.label.as_str();
		let source_id = source.source_id();
		let source_version = source.version();
		tracing::info!(
			cache = label,
			source = source_id.as_u64(),
			version = source_version,
			"cache.build.start"
		);

		let start = Instant::now();
		let items = match build(source) {
			Ok(items) => items,
			Err(err) => {
				self.stats.record_failure();
				tracing::warn!(
					cache = label,
					source = source_id.as_u64(),
					elapsed_ms = saturating_millis(start.elapsed()),
					"cache.build.failed"
				);
				return Err(err);
			}
		};
		let elapsed = start.elapsed();

		let entry = Arc::new(CacheEntry::new(items, source_id, source_version, elapsed));
		self.entry.store(Some(Arc::clone(&entry)));
		self.stats.record_build();

		let elapsed_ms = saturating_millis(elapsed);
		if elapsed >= self.options.slow_build_threshold() {
			tracing::warn!(cache = label, items = entry.len(), elapsed_ms, "cache.build.slow");
		} else {
			tracing::info!(cache = label, items = entry.len(), elapsed_ms, "cache.build.done");
		}

		Ok(entry)
	}
}

impl<T> Default for VersionedCache<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for VersionedCache<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VersionedCache")
			.field("label", &self.options.label)
			.field("entry", &self.entry.load().as_deref())
			.finish()
	}
}
