use crate::error::Result;
use git2::Repository;
use scopetime::scope_time;

/// the most recent tag: tags are ordered by the committer time of the
/// commit they point at (newest first, ties by name descending) and the
/// first one is returned. tags not pointing at a commit are skipped.
pub fn get_latest_tag_repo(
	repo: &Repository,
) -> Result<Option<String>> {
	scope_time!("get_latest_tag_repo");

	let mut latest: Option<(i64, String)> = None;

	for name in repo.tag_names(None)?.iter().flatten() {
		let obj = repo.revparse_single(&format!("refs/tags/{name}"))?;

		let Ok(commit) = obj.peel_to_commit() else {
			log::trace!("tag without commit: {}", name);
			continue;
		};

		let time = commit.committer().when().seconds();

		let newer =
			latest.as_ref().map_or(true, |(last_time, last_name)| {
				(time, name) > (*last_time, last_name.as_str())
			});

		if newer {
			latest = Some((time, name.to_string()));
		}
	}

	Ok(latest.map(|(_, name)| name))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sync::tests::{commit_at, repo_init};
	use pretty_assertions::assert_eq;

	#[test]
	fn test_smoke() {
		let (_td, repo) = repo_init();

		assert_eq!(get_latest_tag_repo(&repo).unwrap(), None);
	}

	#[test]
	fn test_newest_commit_wins() {
		let (_td, repo) = repo_init();

		let old = commit_at(&repo, "old", 1_000);
		let new = commit_at(&repo, "new", 2_000);

		let sig = repo.signature().unwrap();
		// annotated tag on the newer commit, created first
		let new = repo.find_object(new, None).unwrap();
		let old = repo.find_object(old, None).unwrap();
		repo.tag("b-release", &new, &sig, "", false).unwrap();
		repo.tag_lightweight("z-old", &old, false).unwrap();

		assert_eq!(
			get_latest_tag_repo(&repo).unwrap(),
			Some(String::from("b-release"))
		);
	}

	#[test]
	fn test_same_commit_by_name() {
		let (_td, repo) = repo_init();
		let head = repo.head().unwrap().peel_to_commit().unwrap();
		let obj = head.as_object();

		repo.tag_lightweight("a", obj, false).unwrap();
		repo.tag_lightweight("b", obj, false).unwrap();

		assert_eq!(
			get_latest_tag_repo(&repo).unwrap(),
			Some(String::from("b"))
		);
	}

	#[test]
	fn test_tag_on_tree_skipped() {
		let (_td, repo) = repo_init();
		let head = repo.head().unwrap().peel_to_commit().unwrap();
		let tree = head.tree().unwrap();

		repo.tag_lightweight("tree-tag", tree.as_object(), false)
			.unwrap();

		assert_eq!(get_latest_tag_repo(&repo).unwrap(), None);
	}
}
