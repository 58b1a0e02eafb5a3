//! sync git and build metadata api, meant to run on a background thread

pub mod branch;
mod info;
pub mod maven;
mod repository;
mod tags;
pub mod utils;

pub use branch::get_branch_name_repo;
pub use info::{fetch_git_info, fetch_snapshot, GitInfo};
pub use maven::{
	parse_pom, read_pom, MavenProjects, PomInfo, POM_FILE,
};
pub use repository::{is_repo_root, open_repo};
pub use tags::get_latest_tag_repo;
