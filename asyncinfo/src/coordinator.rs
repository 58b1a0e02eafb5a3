//! decides per render request whether to refresh a cache entry

use crate::{
	cache::{InfoCache, InfoSnapshot},
	error::{Error, Result},
	InfoNotification,
};
use crossbeam_channel::Sender;
use rayon_core::ThreadPool;
use std::{
	panic::{self, AssertUnwindSafe},
	path::{Path, PathBuf},
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	},
	time::{Duration, Instant},
};

/// age after which a snapshot gets refreshed
pub const DEFAULT_TTL: Duration = Duration::from_millis(30_000);
/// fetches finishing later than this are dropped
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// serves cached snapshots right away and refreshes stale ones on a
/// threadpool, sending [`InfoNotification::Info`] once a new snapshot
/// landed in the cache.
///
/// there is no de-duplication: requesting a stale key again while its
/// fetch is in flight spawns another fetch, the one completing last
/// wins.
#[derive(Clone)]
pub struct RefreshCoordinator {
	cache: InfoCache,
	sender: Sender<InfoNotification>,
	pending: Arc<AtomicUsize>,
	pool: Option<Arc<ThreadPool>>,
	ttl: Duration,
	deadline: Option<Duration>,
}

impl RefreshCoordinator {
	///
	pub fn new(
		cache: InfoCache,
		sender: &Sender<InfoNotification>,
	) -> Self {
		Self {
			cache,
			sender: sender.clone(),
			pending: Arc::new(AtomicUsize::new(0)),
			pool: None,
			ttl: DEFAULT_TTL,
			deadline: Some(DEFAULT_DEADLINE),
		}
	}

	///
	#[must_use]
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;
		self
	}

	/// `None` lets every fetch write its result no matter how late
	#[must_use]
	pub fn with_deadline(
		mut self,
		deadline: Option<Duration>,
	) -> Self {
		self.deadline = deadline;
		self
	}

	/// run fetches on `pool` instead of the global rayon pool
	#[must_use]
	pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
		self.pool = Some(pool);
		self
	}

	///
	pub const fn cache(&self) -> &InfoCache {
		&self.cache
	}

	///
	pub const fn ttl(&self) -> Duration {
		self.ttl
	}

	///
	pub const fn deadline(&self) -> Option<Duration> {
		self.deadline
	}

	/// number of fetches still running
	pub fn pending(&self) -> usize {
		self.pending.load(Ordering::Relaxed)
	}

	///
	pub fn is_pending(&self) -> bool {
		self.pending() > 0
	}

	/// returns the cached snapshot of `key` (if any) without blocking.
	///
	/// if it is missing or older than the ttl `fetch` gets scheduled.
	/// a successful fetch is stored and announced, a failing one is
	/// logged and the stale entry stays in place.
	pub fn request_snapshot<F>(
		&self,
		key: &Path,
		fetch: F,
	) -> Option<Arc<InfoSnapshot>>
	where
		F: FnOnce(&Path) -> Result<InfoSnapshot> + Send + 'static,
	{
		self.request_snapshot_with(key, |_| true, fetch)
	}

	/// like [`Self::request_snapshot`], additionally refetching fresh
	/// entries that `usable` rejects (taken with less detail than the
	/// caller needs now)
	pub fn request_snapshot_with<U, F>(
		&self,
		key: &Path,
		usable: U,
		fetch: F,
	) -> Option<Arc<InfoSnapshot>>
	where
		U: FnOnce(&InfoSnapshot) -> bool,
		F: FnOnce(&Path) -> Result<InfoSnapshot> + Send + 'static,
	{
		let cached = self.cache.get(key);

		let stale = cached.as_ref().map_or(true, |snapshot| {
			snapshot.age_at(Instant::now()) > self.ttl
				|| !usable(snapshot)
		});

		if stale {
			log::trace!("request: {}", key.display());
			self.spawn_fetch(key.to_path_buf(), fetch);
		}

		cached
	}

	fn spawn_fetch<F>(&self, key: PathBuf, fetch: F)
	where
		F: FnOnce(&Path) -> Result<InfoSnapshot> + Send + 'static,
	{
		let cache = self.cache.clone();
		let sender = self.sender.clone();
		let arc_pending = Arc::clone(&self.pending);
		let deadline = self.deadline;

		self.pending.fetch_add(1, Ordering::Relaxed);

		let job = move || {
			let notification =
				Self::run_fetch(&cache, key, deadline, fetch);

			arc_pending.fetch_sub(1, Ordering::Relaxed);

			if let Err(e) = sender.send(notification) {
				log::error!("info notification error: {}", e);
			}
		};

		match &self.pool {
			Some(pool) => pool.spawn(job),
			None => rayon_core::spawn(job),
		}
	}

	fn run_fetch<F>(
		cache: &InfoCache,
		key: PathBuf,
		deadline: Option<Duration>,
		fetch: F,
	) -> InfoNotification
	where
		F: FnOnce(&Path) -> Result<InfoSnapshot>,
	{
		let started = Instant::now();

		let result =
			panic::catch_unwind(AssertUnwindSafe(|| fetch(&key)))
				.unwrap_or_else(|payload| {
					Err(Error::FetchPanic(panic_msg(&*payload)))
				});

		let late = deadline.is_some_and(|d| started.elapsed() > d);

		match result {
			Ok(_) if late => {
				log::warn!(
					"fetch exceeded deadline ({:?}): {}",
					started.elapsed(),
					key.display()
				);
				InfoNotification::FinishUnchanged
			}
			Ok(snapshot) => {
				cache.put(key, snapshot);
				InfoNotification::Info
			}
			Err(e) => {
				log::error!("fetch error [{}]: {}", key.display(), e);
				InfoNotification::FinishUnchanged
			}
		}
	}
}

fn panic_msg(payload: &(dyn std::any::Any + Send)) -> String {
	payload
		.downcast_ref::<&str>()
		.map(ToString::to_string)
		.or_else(|| payload.downcast_ref::<String>().cloned())
		.unwrap_or_else(|| String::from("unknown panic"))
}
