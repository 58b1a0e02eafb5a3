//! asyncinfo provides the background side of annotated tree views:
//! a ttl bounded cache of git info per directory, a coordinator that
//! refreshes stale entries on a threadpool and notifies the ui through
//! a channel, the decorator configuration and the pure formatting of
//! the resulting labels.

#![deny(missing_docs)]
#![deny(
	unused_imports,
	unused_must_use,
	dead_code,
	unstable_name_collisions,
	unsafe_code
)]
#![deny(clippy::all, clippy::perf)]
#![cfg_attr(
	not(test),
	deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
mod coordinator;
mod error;
pub mod format;
pub mod sync;

pub use crate::{
	cache::{InfoCache, InfoSnapshot},
	config::{
		ColorField, DecoratorConfig, DecoratorConfigFile,
		DecoratorVariant, RepoLookup, Rgb, Toggle,
	},
	coordinator::{RefreshCoordinator, DEFAULT_DEADLINE, DEFAULT_TTL},
	error::{Error, Result},
	format::{decorate, Decoration, Fragment, FragmentKind, Weight},
};

/// this type is used to communicate events back through the channel
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InfoNotification {
	/// a fetch stored a new snapshot, views should re-render
	Info,
	/// a fetch finished without touching the cache
	FinishUnchanged,
}
