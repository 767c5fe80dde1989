use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Point-in-time copy of a cache's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
	/// Requests served from a valid entry, on either the fast path or the locked re-check.
	pub hits: u64,
	/// Successful publications.
	pub builds: u64,
	/// Builder invocations that returned an error.
	pub failures: u64,
	/// Calls to [`crate::VersionedCache::invalidate`].
	pub invalidations: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StatsCell {
	hits: AtomicU64,
	builds: AtomicU64,
	failures: AtomicU64,
	invalidations: AtomicU64,
}

impl StatsCell {
	#[inline]
	pub(crate) fn record_hit(&self) {
		self.hits.fetch_add(1, Ordering::Relaxed);
	}

	#[inline]
	pub(crate) fn record_build(&self) {
		self.builds.fetch_add(1, Ordering::Relaxed);
	}

	#[inline]
	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}

	#[inline]
	pub(crate) fn record_invalidation(&self) {
		self.invalidations.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn snapshot(&self) -> CacheStats {
		CacheStats {
			hits: self.hits.load(Ordering::Relaxed),
			builds: self.builds.load(Ordering::Relaxed),
			failures: self.failures.load(Ordering::Relaxed),
			invalidations: self.invalidations.load(Ordering::Relaxed),
		}
	}
}
