//! Cached listing of the defined strings of a loaded program.
//!
//! Walking every defined datum of a program to find strings is slow and the listing is
//! requested far more often than the program changes. [`StringIndex`] keeps the collected
//! [`StringInfo`] records in a [`quarry_cache::VersionedCache`] keyed by the program's identity
//! and modification counter, and answers paginated, filtered queries against that snapshot.
//!
//! # Data flow
//!
//! 1. A [`StringSource`] yields raw [`DefinedString`] records in program order.
//! 2. [`collect_strings`] turns them into [`StringInfo`], precomputing the lowercase value.
//! 3. [`StringIndex::list`] selects a [`StringPage`] according to a [`StringQuery`].

mod error;
mod index;
mod info;
mod query;
mod source;

pub use error::{SourceError, StringError};
pub use index::{StringIndex, collect_strings};
pub use info::StringInfo;
pub use query::{DEFAULT_LIMIT, StringPage, StringQuery};
pub use quarry_cache::{CacheOptions, CacheStats, CacheStatus, DataSource, SourceId};
pub use source::{DefinedString, StringSource};
