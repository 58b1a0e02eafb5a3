use crate::tree::{ProjectTree, TreeNode};
use asyncinfo::{
	decorate, sync, Decoration, DecoratorConfig, RefreshCoordinator,
};

/// combines build metadata, cached git info and settings into the
/// decoration of a tree node
pub struct Decorator {
	coordinator: RefreshCoordinator,
}

impl Decorator {
	pub const fn new(coordinator: RefreshCoordinator) -> Self {
		Self { coordinator }
	}

	pub const fn coordinator(&self) -> &RefreshCoordinator {
		&self.coordinator
	}

	/// schedules a fetch for every eligible node whose git info is
	/// missing or stale. never blocks
	pub fn request_all(
		&self,
		tree: &ProjectTree,
		config: &DecoratorConfig,
	) {
		if !config.fetches_git() {
			return;
		}

		let lookup = config.variant.repo_lookup();
		let with_tags = config.fetches_tags();

		for node in tree.nodes() {
			if !Self::is_eligible(tree, node, config) {
				continue;
			}

			self.coordinator.request_snapshot_with(
				&node.path,
				|snapshot| !with_tags || snapshot.tags_fetched(),
				move |path| {
					sync::fetch_snapshot(path, lookup, with_tags)
				},
			);
		}
	}

	/// decoration from what is cached right now
	pub fn decorate(
		&self,
		tree: &ProjectTree,
		node: &TreeNode,
		config: &DecoratorConfig,
	) -> Decoration {
		if !Self::is_eligible(tree, node, config) {
			return Decoration::default();
		}

		let version = tree.maven().version(&node.path);
		let snapshot = if config.fetches_git() {
			self.coordinator.cache().get(&node.path)
		} else {
			None
		};

		decorate(config, version, snapshot.as_deref())
	}

	fn is_eligible(
		tree: &ProjectTree,
		node: &TreeNode,
		config: &DecoratorConfig,
	) -> bool {
		!config.variant.requires_build_metadata()
			|| tree.maven().is_project(&node.path)
	}
}
