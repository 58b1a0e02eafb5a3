//! branch functions

use super::utils::bytes2string;
use crate::error::{Error, Result};
use git2::Repository;
use scopetime::scope_time;

/// length of the abbreviated commit id shown for a detached head
pub const SHORT_ID_LEN: usize = 7;

/// returns the branch-name head is currently pointing to,
/// the abbreviated commit id if head is detached
pub fn get_branch_name_repo(repo: &Repository) -> Result<String> {
	scope_time!("get_branch_name_repo");

	let head_ref = repo.head().map_err(|e| {
		if e.code() == git2::ErrorCode::UnbornBranch {
			Error::NoHead
		} else {
			e.into()
		}
	})?;

	if repo.head_detached()? {
		let commit = head_ref.peel_to_commit()?;
		return Ok(commit
			.id()
			.to_string()
			.chars()
			.take(SHORT_ID_LEN)
			.collect());
	}

	bytes2string(head_ref.shorthand_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sync::tests::{
		commit_empty, repo_init, repo_init_empty,
	};
	use pretty_assertions::assert_eq;

	#[test]
	fn test_smoke() {
		let (_td, repo) = repo_init();

		assert_eq!(get_branch_name_repo(&repo).unwrap(), "master");
	}

	#[test]
	fn test_other_branch() {
		let (_td, repo) = repo_init();
		let head = repo.head().unwrap().peel_to_commit().unwrap();
		repo.branch("feature/x", &head, false).unwrap();
		repo.set_head("refs/heads/feature/x").unwrap();

		assert_eq!(get_branch_name_repo(&repo).unwrap(), "feature/x");
	}

	#[test]
	fn test_detached_head() {
		let (_td, repo) = repo_init();
		let id = commit_empty(&repo, "second");
		repo.set_head_detached(id).unwrap();

		let name = get_branch_name_repo(&repo).unwrap();

		assert_eq!(name.len(), SHORT_ID_LEN);
		assert!(id.to_string().starts_with(&name));
	}

	#[test]
	fn test_unborn() {
		let (_td, repo) = repo_init_empty();

		assert!(matches!(
			get_branch_name_repo(&repo),
			Err(Error::NoHead)
		));
	}
}
