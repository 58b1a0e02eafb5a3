use anyhow::{anyhow, Result};
use asyncinfo::sync::MavenProjects;
use ignore::WalkBuilder;
use scopetime::scope_time;
use std::path::{Path, PathBuf};

/// a directory shown in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
	pub path: PathBuf,
	pub name: String,
	pub depth: usize,
}

/// directories below a root in display order (depth first, sorted by
/// name) plus the maven projects found among them
pub struct ProjectTree {
	root: PathBuf,
	nodes: Vec<TreeNode>,
	maven: MavenProjects,
}

impl ProjectTree {
	/// walks `root`, honouring `.gitignore` and skipping hidden dirs
	pub fn scan(
		root: &Path,
		max_depth: Option<usize>,
	) -> Result<Self> {
		scope_time!("tree_scan");

		if !root.is_dir() {
			return Err(anyhow!(
				"not a directory: {}",
				root.display()
			));
		}

		let root = root.canonicalize()?;
		let mut nodes = Vec::new();
		let mut maven = MavenProjects::new();

		let walker = WalkBuilder::new(&root)
			.hidden(true)
			.max_depth(max_depth)
			.sort_by_file_name(|a, b| a.cmp(b))
			.build();

		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(e) => {
					log::warn!("tree scan: {}", e);
					continue;
				}
			};

			if !entry.file_type().is_some_and(|t| t.is_dir()) {
				continue;
			}

			let path = entry.into_path();
			let depth = path
				.strip_prefix(&root)
				.map_or(0, |rel| rel.components().count());

			maven.scan_dir(&path);

			nodes.push(TreeNode {
				name: node_name(&path),
				path,
				depth,
			});
		}

		log::debug!(
			"scanned {} dirs, {} maven projects",
			nodes.len(),
			maven.len()
		);

		Ok(Self { root, nodes, maven })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn nodes(&self) -> &[TreeNode] {
		&self.nodes
	}

	pub fn maven(&self) -> &MavenProjects {
		&self.maven
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

fn node_name(path: &Path) -> String {
	path.file_name().map_or_else(
		|| path.display().to_string(),
		|name| name.to_string_lossy().into_owned(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::fs;
	use tempfile::TempDir;

	fn names(tree: &ProjectTree) -> Vec<(usize, String)> {
		tree.nodes()
			.iter()
			.map(|n| (n.depth, n.name.clone()))
			.collect()
	}

	#[test]
	fn test_scan_order_and_depth() {
		let td = TempDir::new().unwrap();
		let root = td.path();
		fs::create_dir_all(root.join("b/inner")).unwrap();
		fs::create_dir_all(root.join("a")).unwrap();
		fs::create_dir_all(root.join(".hidden")).unwrap();
		fs::write(root.join("a/file.txt"), "x").unwrap();

		let tree = ProjectTree::scan(root, None).unwrap();

		let root_name = root
			.canonicalize()
			.unwrap()
			.file_name()
			.unwrap()
			.to_string_lossy()
			.into_owned();
		assert_eq!(
			names(&tree),
			vec![
				(0, root_name),
				(1, String::from("a")),
				(1, String::from("b")),
				(2, String::from("inner")),
			]
		);
	}

	#[test]
	fn test_max_depth() {
		let td = TempDir::new().unwrap();
		fs::create_dir_all(td.path().join("a/b/c")).unwrap();

		let tree = ProjectTree::scan(td.path(), Some(1)).unwrap();

		assert_eq!(tree.len(), 2);
	}

	#[test]
	fn test_maven_projects_indexed() {
		let td = TempDir::new().unwrap();
		let service = td.path().join("service");
		fs::create_dir(&service).unwrap();
		fs::write(
			service.join("pom.xml"),
			"<project><version>1.2.3</version></project>",
		)
		.unwrap();

		let tree = ProjectTree::scan(td.path(), None).unwrap();
		let service = service.canonicalize().unwrap();

		assert_eq!(tree.maven().version(&service), Some("1.2.3"));
		assert!(!tree.maven().is_project(tree.root()));
	}

	#[test]
	fn test_not_a_dir() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("file");
		fs::write(&file, "x").unwrap();

		assert!(ProjectTree::scan(&file, None).is_err());
	}
}
