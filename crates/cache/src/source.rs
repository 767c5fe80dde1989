//! Data source collaborator contract.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one data source instance.
///
/// Two instances never share an id, even when they report the same version. A reloaded
/// source is a new instance and must allocate a new id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
	/// Allocates an id that has not been handed out before in this process.
	pub fn fresh() -> Self {
		Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
	}

	#[inline]
	pub const fn as_u64(self) -> u64 {
		self.0
	}
}

/// Mutable external data that a [`crate::VersionedCache`] derives its artifact from.
pub trait DataSource {
	/// Stable identity of this instance.
	fn source_id(&self) -> SourceId;

	/// Monotonic counter that changes iff observable content changed.
	fn version(&self) -> u64;
}

impl<S: DataSource + ?Sized> DataSource for &S {
	#[inline]
	fn source_id(&self) -> SourceId {
		(**self).source_id()
	}

	#[inline]
	fn version(&self) -> u64 {
		(**self).version()
	}
}

impl<S: DataSource + ?Sized> DataSource for Arc<S> {
	#[inline]
	fn source_id(&self) -> SourceId {
		(**self).source_id()
	}

	#[inline]
	fn version(&self) -> u64 {
		(**self).version()
	}
}
