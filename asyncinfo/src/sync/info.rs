use super::{
	branch::get_branch_name_repo, repository::open_repo,
	tags::get_latest_tag_repo,
};
use crate::{
	cache::InfoSnapshot,
	config::RepoLookup,
	error::{Error, Result},
};
use scopetime::scope_time;
use std::path::Path;

/// git side information of a versioned directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
	///
	pub branch: Option<String>,
	///
	pub tag: Option<String>,
}

/// `Ok(None)` if `path` has no versioned state.
/// an unborn head yields no branch, a failing tag lookup no tag
pub fn fetch_git_info(
	path: &Path,
	lookup: RepoLookup,
	with_tags: bool,
) -> Result<Option<GitInfo>> {
	scope_time!("fetch_git_info");

	let Some(repo) = open_repo(path, lookup)? else {
		return Ok(None);
	};

	let branch = match get_branch_name_repo(&repo) {
		Ok(branch) => Some(branch),
		Err(Error::NoHead) => None,
		Err(e) => return Err(e),
	};

	let tag = if with_tags {
		get_latest_tag_repo(&repo).unwrap_or_else(|e| {
			log::error!("tag lookup [{}]: {}", path.display(), e);
			None
		})
	} else {
		None
	};

	Ok(Some(GitInfo { branch, tag }))
}

/// [`fetch_git_info`] as a cacheable snapshot, no versioned state
/// becomes the "no info" snapshot
pub fn fetch_snapshot(
	path: &Path,
	lookup: RepoLookup,
	with_tags: bool,
) -> Result<InfoSnapshot> {
	Ok(fetch_git_info(path, lookup, with_tags)?.map_or_else(
		InfoSnapshot::not_versioned,
		|info| {
			InfoSnapshot::new(info.branch, info.tag)
				.with_tags_fetched(with_tags)
		},
	))
}
