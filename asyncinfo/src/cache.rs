//! ttl bounded store of the latest known git info per subject path.
//!
//! the cache owns no io, it is filled by fetch jobs scheduled through
//! [`crate::RefreshCoordinator`] and read on the render path.

use std::{
	collections::HashMap,
	path::{Path, PathBuf},
	sync::{Arc, PoisonError, RwLock},
	time::{Duration, Instant},
};

/// branch and tag of a subject as seen at `fetched_at`.
/// never mutated, a refresh replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSnapshot {
	branch: Option<String>,
	tag: Option<String>,
	versioned: bool,
	tags_fetched: bool,
	fetched_at: Instant,
}

impl InfoSnapshot {
	/// snapshot of a versioned subject taken now
	pub fn new(branch: Option<String>, tag: Option<String>) -> Self {
		Self::new_at(branch, tag, Instant::now())
	}

	/// snapshot of a versioned subject taken at `fetched_at`.
	/// empty strings are stored as absent values
	pub fn new_at(
		branch: Option<String>,
		tag: Option<String>,
		fetched_at: Instant,
	) -> Self {
		Self {
			branch: branch.filter(|b| !b.is_empty()),
			tag: tag.filter(|t| !t.is_empty()),
			versioned: true,
			tags_fetched: true,
			fetched_at,
		}
	}

	/// the "no info" outcome: the subject has no versioned state.
	/// cached like any other result, so it is not looked up again
	/// on every render
	pub fn not_versioned() -> Self {
		Self::not_versioned_at(Instant::now())
	}

	///
	pub const fn not_versioned_at(fetched_at: Instant) -> Self {
		Self {
			branch: None,
			tag: None,
			versioned: false,
			tags_fetched: true,
			fetched_at,
		}
	}

	/// marks whether the tag was looked up at all, a snapshot taken
	/// without tags cannot serve a view that shows them
	#[must_use]
	pub fn with_tags_fetched(mut self, fetched: bool) -> Self {
		self.tags_fetched = fetched;
		self
	}

	///
	pub const fn tags_fetched(&self) -> bool {
		self.tags_fetched
	}

	///
	pub fn branch(&self) -> Option<&str> {
		self.branch.as_deref()
	}

	///
	pub fn tag(&self) -> Option<&str> {
		self.tag.as_deref()
	}

	/// `false` for subjects that turned out not to be repositories
	pub const fn is_versioned(&self) -> bool {
		self.versioned
	}

	///
	pub const fn fetched_at(&self) -> Instant {
		self.fetched_at
	}

	/// age relative to `now`, zero if `now` lies before `fetched_at`
	pub fn age_at(&self, now: Instant) -> Duration {
		now.saturating_duration_since(self.fetched_at)
	}
}

/// concurrent map of subject path to its latest [`InfoSnapshot`].
///
/// cloning is cheap and every clone refers to the same entries.
/// at most one snapshot exists per key, the last `put` wins.
/// entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct InfoCache {
	entries: Arc<RwLock<HashMap<PathBuf, Arc<InfoSnapshot>>>>,
}

impl InfoCache {
	///
	pub fn new() -> Self {
		Self::default()
	}

	/// most recent snapshot for `key`, `None` if never fetched
	pub fn get(&self, key: &Path) -> Option<Arc<InfoSnapshot>> {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(key)
			.cloned()
	}

	/// replaces any existing entry for `key`
	pub fn put(
		&self,
		key: impl Into<PathBuf>,
		snapshot: impl Into<Arc<InfoSnapshot>>,
	) {
		self.entries
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(key.into(), snapshot.into());
	}

	/// `true` if there is no entry or it is older than `ttl`
	pub fn is_stale(&self, key: &Path, ttl: Duration) -> bool {
		self.is_stale_at(key, ttl, Instant::now())
	}

	/// like [`Self::is_stale`] but measured against `now`
	pub fn is_stale_at(
		&self,
		key: &Path,
		ttl: Duration,
		now: Instant,
	) -> bool {
		self.get(key)
			.map_or(true, |snapshot| snapshot.age_at(now) > ttl)
	}

	///
	pub fn len(&self) -> usize {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	///
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
