//! Concurrency invariants of [`crate::VersionedCache`].
//!
//! Each `inv_*` function states one property; the `test_*` wrappers run it.

use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use crate::{DataSource, VersionedCache};
use crate::test_fixtures::{CountingBuilder, TestSource};

const THREADS: usize = 16;

/// Invariant: N concurrent readers of a stale slot trigger exactly one build and all observe
/// the same published items.
pub(crate) fn inv_single_build_per_cycle() {
	let cache = VersionedCache::<usize>::new();
	let source = TestSource::new(1, 3);
	let builder = CountingBuilder::default();
	let barrier = Barrier::new(THREADS);

	for cycle in 1..=2 {
		let (cache_ref, source_ref) = (&cache, &source);
		let (builder_ref, barrier_ref) = (&builder, &barrier);
		let results: Vec<Arc<[usize]>> = thread::scope(|s| {
			let handles: Vec<_> = (0..THREADS)
				.map(|_| {
					s.spawn(move || {
						barrier_ref.wait();
						cache_ref
							.get_or_build(source_ref, |src| {
								thread::sleep(Duration::from_millis(50));
								builder_ref.build(src)
							})
							.unwrap()
					})
				})
				.collect();
			handles.into_iter().map(|h| h.join().unwrap()).collect()
		});

		assert_eq!(builder.calls(), cycle, "exactly one build per cycle");
		let first = &results[0];
		assert_eq!(first.len(), 3);
		for items in &results {
			assert!(Arc::ptr_eq(first, items), "all callers share one artifact");
		}

		cache.invalidate();
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_single_build_per_cycle() {
	inv_single_build_per_cycle()
}

/// Invariant: an entry is valid only for the instance AND version it was built from.
pub(crate) fn inv_validity_is_conjunctive() {
	let cache = VersionedCache::<usize>::new();
	let builder = CountingBuilder::default();
	let a = TestSource::new(5, 3);
	let b = TestSource::new(5, 3);

	cache.get_or_build(&a, |src| builder.build(src)).unwrap();
	let entry = cache.current().unwrap();

	assert!(entry.is_valid_for(&a));
	assert!(!entry.is_valid_for(&b), "same version on another instance is stale");

	a.set_len(3);
	assert_eq!(a.version(), 6);
	assert!(!entry.is_valid_for(&a), "newer version on same instance is stale");

	assert!(!cache.status(Some(&a)).valid);
	assert!(!cache.status(Some(&b)).valid);

	cache.get_or_build(&b, |src| builder.build(src)).unwrap();
	assert_eq!(builder.calls(), 2, "other instance forces a rebuild");
}

#[cfg_attr(test, test)]
pub(crate) fn test_validity_is_conjunctive() {
	inv_validity_is_conjunctive()
}

/// Invariant: status fields always come from one entry, even while entries are replaced.
///
/// Every entry published here has `len == source_version`, so a status mixing two entries
/// would break the equality.
pub(crate) fn inv_status_never_torn() {
	const ROUNDS: u64 = 300;

	let cache = VersionedCache::<usize>::new();
	let observer = TestSource::new(0, 0);
	let done = AtomicBool::new(false);

	thread::scope(|s| {
		for _ in 0..4 {
			s.spawn(|| {
				while !done.load(Ordering::Acquire) {
					let status = cache.status(Some(&observer));
					if status.cached {
						assert_eq!(
							status.size as u64, status.source_version,
							"torn status: {status:?}"
						);
						assert!(!status.valid);
					} else {
						assert_eq!(status, crate::CacheStatus::EMPTY);
					}
					if let Some(entry) = cache.current() {
						assert_eq!(entry.len() as u64, entry.source_version());
					}
				}
			});
		}

		for round in 1..=ROUNDS {
			let source = TestSource::new(round, round as usize);
			cache
				.get_or_build(&source, |src| Ok::<_, Infallible>((0..src.len()).collect()))
				.unwrap();
			if round % 3 == 0 {
				cache.invalidate();
			}
		}
		done.store(true, Ordering::Release);
	});
}

#[cfg_attr(test, test)]
pub(crate) fn test_status_never_torn() {
	inv_status_never_torn()
}

/// Invariant: a failing or panicking builder publishes nothing and leaves the cache usable.
pub(crate) fn inv_failure_does_not_poison() {
	let cache = VersionedCache::<usize>::new();
	let source = TestSource::new(1, 2);
	let builder = CountingBuilder::default();

	let err = cache
		.get_or_build(&source, |_| Err::<Vec<usize>, _>("extraction failed"))
		.unwrap_err();
	assert_eq!(err, "extraction failed");
	assert!(cache.current().is_none());
	assert_eq!(cache.stats().failures, 1);

	let panicked = panic::catch_unwind(AssertUnwindSafe(|| {
		cache.get_or_build(&source, |_| -> Result<Vec<usize>, Infallible> {
			panic!("builder panicked")
		})
	}));
	assert!(panicked.is_err());
	assert!(cache.current().is_none());

	let items = cache.get_or_build(&source, |src| builder.build(src)).unwrap();
	assert_eq!(&*items, &[0, 1]);
	assert!(cache.status(Some(&source)).valid);

	// A failure after a successful build keeps the stale entry in place.
	source.set_len(4);
	assert!(cache.get_or_build(&source, |_| Err::<Vec<usize>, _>(())).is_err());
	let status = cache.status(Some(&source));
	assert!(status.cached);
	assert!(!status.valid);
	assert_eq!(status.size, 2);

	let items = cache.get_or_build(&source, |src| builder.build(src)).unwrap();
	assert_eq!(items.len(), 4);
}

#[cfg_attr(test, test)]
pub(crate) fn test_failure_does_not_poison() {
	inv_failure_does_not_poison()
}

/// Invariant: the entry is stamped with the version seen before the builder ran.
///
/// A mutation landing mid-build must not be masked by the publication.
pub(crate) fn inv_version_captured_at_build_start() {
	let cache = VersionedCache::<usize>::new();
	let source = TestSource::new(1, 3);
	let builder = CountingBuilder::default();

	let items = cache
		.get_or_build(&source, |src| {
			let items = builder.build(src);
			src.set_len(10);
			items
		})
		.unwrap();
	assert_eq!(items.len(), 3);

	let entry = cache.current().unwrap();
	assert_eq!(entry.source_version(), 1);
	assert!(!cache.status(Some(&source)).valid);

	let items = cache.get_or_build(&source, |src| builder.build(src)).unwrap();
	assert_eq!(builder.calls(), 2);
	assert_eq!(items.len(), 10);
}

#[cfg_attr(test, test)]
pub(crate) fn test_version_captured_at_build_start() {
	inv_version_captured_at_build_start()
}

/// Invariant: invalidate racing an in-flight build does not block, and the build still
/// publishes (last write wins).
pub(crate) fn inv_invalidate_during_build_publishes() {
	let cache = VersionedCache::<usize>::new();
	let source = TestSource::new(1, 3);
	let (started_tx, started_rx) = mpsc::channel::<()>();
	let (release_tx, release_rx) = mpsc::channel::<()>();

	thread::scope(|s| {
		let (cache_ref, source_ref) = (&cache, &source);
		let builder = s.spawn(move || {
			cache_ref
				.get_or_build(source_ref, |src| {
					started_tx.send(()).unwrap();
					release_rx.recv().unwrap();
					Ok::<_, Infallible>((0..src.len()).collect::<Vec<_>>())
				})
				.unwrap()
		});

		started_rx.recv().unwrap();
		cache.invalidate();
		assert!(cache.current().is_none());
		release_tx.send(()).unwrap();

		let items = builder.join().unwrap();
		assert_eq!(items.len(), 3);
	});

	let status = cache.status(Some(&source));
	assert!(status.cached);
	assert!(status.valid);
	assert_eq!(cache.stats().invalidations, 1);
}

#[cfg_attr(test, test)]
pub(crate) fn test_invalidate_during_build_publishes() {
	inv_invalidate_during_build_publishes()
}

/// Invariant: a reader holding a valid entry returns without waiting on a build that
/// another thread is running for a different source.
pub(crate) fn inv_fast_path_does_not_block_on_build() {
	let cache = VersionedCache::<usize>::new();
	let a = TestSource::new(1, 2);
	let b = TestSource::new(1, 4);
	let builder = CountingBuilder::default();
	cache.get_or_build(&a, |src| builder.build(src)).unwrap();

	let (started_tx, started_rx) = mpsc::channel::<()>();
	let (release_tx, release_rx) = mpsc::channel::<()>();
	let (read_tx, read_rx) = mpsc::channel::<Result<Arc<[usize]>, &'static str>>();

	thread::scope(|s| {
		let (cache_ref, a_ref, b_ref) = (&cache, &a, &b);
		let build_b = s.spawn(move || {
			cache_ref
				.get_or_build(b_ref, |src| {
					started_tx.send(()).unwrap();
					release_rx.recv().unwrap();
					Ok::<_, Infallible>((0..src.len()).collect::<Vec<_>>())
				})
				.unwrap()
		});
		started_rx.recv().unwrap();

		s.spawn(move || {
			let items = cache_ref.get_or_build(a_ref, |_| Err("builder must not run"));
			read_tx.send(items).unwrap();
		});

		let read = read_rx.recv_timeout(Duration::from_secs(5));
		release_tx.send(()).unwrap();

		let items = read
			.expect("fast path waited for the in-flight build")
			.unwrap();
		assert_eq!(&*items, &[0, 1]);

		let items = build_b.join().unwrap();
		assert_eq!(items.len(), 4);
	});

	assert_eq!(builder.calls(), 1);
	let status = cache.status(Some(&b));
	assert!(status.cached);
	assert!(status.valid);
	assert_eq!(status.size, 4);
}

#[cfg_attr(test, test)]
pub(crate) fn test_fast_path_does_not_block_on_build() {
	inv_fast_path_does_not_block_on_build()
}
