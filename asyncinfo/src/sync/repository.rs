use crate::{config::RepoLookup, error::Result};
use git2::{ErrorCode, Repository, RepositoryOpenFlags};
use std::path::Path;

/// opens the repository `path` belongs to according to `lookup`.
/// `Ok(None)` if there is none (or only a bare one)
pub fn open_repo(
	path: &Path,
	lookup: RepoLookup,
) -> Result<Option<Repository>> {
	let flags = match lookup {
		RepoLookup::Root => RepositoryOpenFlags::NO_SEARCH,
		RepoLookup::Discover => RepositoryOpenFlags::empty(),
	};

	match Repository::open_ext(path, flags, Vec::<&Path>::new()) {
		Ok(repo) if repo.is_bare() => Ok(None),
		Ok(repo) => Ok(Some(repo)),
		Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
		Err(e) => Err(e.into()),
	}
}

/// `true` if `path` is the root of a work tree
pub fn is_repo_root(path: &Path) -> bool {
	matches!(open_repo(path, RepoLookup::Root), Ok(Some(_)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sync::tests::repo_init;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_root_lookup() {
		let (td, _repo) = repo_init();
		let sub = td.path().join("module");
		fs::create_dir(&sub).unwrap();

		assert!(is_repo_root(td.path()));
		assert!(!is_repo_root(&sub));
		assert!(open_repo(&sub, RepoLookup::Root).unwrap().is_none());
	}

	#[test]
	fn test_discover_lookup() {
		let (td, _repo) = repo_init();
		let sub = td.path().join("module").join("nested");
		fs::create_dir_all(&sub).unwrap();

		let repo =
			open_repo(&sub, RepoLookup::Discover).unwrap().unwrap();
		assert_eq!(
			repo.workdir().unwrap().canonicalize().unwrap(),
			td.path().canonicalize().unwrap()
		);
	}

	#[test]
	fn test_no_repo() {
		let td = TempDir::new().unwrap();

		assert!(open_repo(td.path(), RepoLookup::Root)
			.unwrap()
			.is_none());
		assert!(!is_repo_root(td.path()));
	}
}
