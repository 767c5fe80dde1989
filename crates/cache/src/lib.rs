//! Versioned single-slot snapshot cache.
//!
//! # Purpose
//!
//! Hold one immutable artifact derived from a mutable data source, rebuild it lazily when the
//! source changes, and serve steady-state reads without taking any lock.
//!
//! # Mental model
//!
//! * A [`DataSource`] reports an identity ([`SourceId`]) and a version counter.
//! * [`VersionedCache`] stores at most one [`CacheEntry`], stamped with the identity and
//!   version it was built from.
//! * Readers pin an `Arc<CacheEntry<T>>`; an entry is never mutated after publication, only
//!   replaced or dropped.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints |
//! |---|---|---|
//! | [`VersionedCache`] | Atomic slot + build lock | Fast path must never lock |
//! | [`CacheEntry`] | Immutable published artifact | Valid only for matching identity AND version |
//! | [`CacheStatus`] | Diagnostic view | Derived from one entry load |
//! | [`CacheStats`] | Hit/build/failure counters | Diagnostics only |
//! | [`CacheOptions`] | Label and slow-build threshold | Parsed from TOML or defaulted |
//!
//! # Invariants
//!
//! * Reads of a valid entry never wait on an in-flight build.
//!   Tested by `invariants::test_fast_path_does_not_block_on_build`.
//! * At most one builder runs per invalidation cycle.
//!   Tested by `invariants::test_single_build_per_cycle`.
//! * Validity is conjunctive over identity and version.
//!   Tested by `invariants::test_validity_is_conjunctive`.
//! * Status is never torn across rebuilds.
//!   Tested by `invariants::test_status_never_torn`.
//! * Builder failure or panic leaves the cache usable.
//!   Tested by `invariants::test_failure_does_not_poison`.
//!
//! # Concurrency & ordering
//!
//! * Reads are a single `ArcSwapOption` load; publication is a single store.
//! * Rebuilds are serialized by a `parking_lot` mutex that only the slow path takes.
//! * [`VersionedCache::invalidate`] never takes the build lock; a racing build still publishes.

mod cache;
mod entry;
mod error;
mod options;
mod source;
mod stats;
mod status;

pub use cache::VersionedCache;
pub use entry::CacheEntry;
pub use error::OptionsError;
pub use options::CacheOptions;
pub use source::{DataSource, SourceId};
pub use stats::CacheStats;
pub use status::CacheStatus;

#[cfg(test)]
pub(crate) mod invariants;
