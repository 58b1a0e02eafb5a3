//! build metadata of maven projects

use crate::error::Result;
use scopetime::scope_time;
use serde::Deserialize;
use std::{
	collections::HashMap,
	fs,
	path::{Path, PathBuf},
};

///
pub const POM_FILE: &str = "pom.xml";

#[derive(Debug, Default, Deserialize)]
struct PomProject {
	#[serde(default, rename = "artifactId")]
	artifact_id: Option<String>,
	#[serde(default)]
	version: Option<String>,
	#[serde(default)]
	parent: Option<PomParent>,
}

#[derive(Debug, Default, Deserialize)]
struct PomParent {
	#[serde(default)]
	version: Option<String>,
}

/// what the tree needs to know about a maven project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomInfo {
	///
	pub artifact_id: Option<String>,
	/// own version, inherited from `<parent>` if not declared
	pub version: Option<String>,
}

impl PomInfo {
	///
	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}
}

fn trimmed(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

/// parses the content of a `pom.xml`
pub fn parse_pom(content: &str) -> Result<PomInfo> {
	let project: PomProject = quick_xml::de::from_str(content)?;

	let version = trimmed(project.version)
		.or_else(|| trimmed(project.parent.and_then(|p| p.version)));

	Ok(PomInfo {
		artifact_id: trimmed(project.artifact_id),
		version,
	})
}

/// reads `dir/pom.xml`, `Ok(None)` if `dir` is no maven project
pub fn read_pom(dir: &Path) -> Result<Option<PomInfo>> {
	scope_time!("read_pom");

	let file = dir.join(POM_FILE);
	if !file.is_file() {
		return Ok(None);
	}

	let content = fs::read_to_string(file)?;
	parse_pom(&content).map(Some)
}

/// in memory index of the maven projects of a tree,
/// filled while scanning so lookups on the render path need no io
#[derive(Debug, Clone, Default)]
pub struct MavenProjects {
	projects: HashMap<PathBuf, PomInfo>,
}

impl MavenProjects {
	///
	pub fn new() -> Self {
		Self::default()
	}

	/// indexes `dir` if it holds a `pom.xml`. a pom that fails to parse
	/// still marks `dir` as a project, just without version
	pub fn scan_dir(&mut self, dir: &Path) -> bool {
		match read_pom(dir) {
			Ok(Some(info)) => {
				self.projects.insert(dir.to_path_buf(), info);
				true
			}
			Ok(None) => false,
			Err(e) => {
				log::warn!("pom error [{}]: {}", dir.display(), e);
				self.projects
					.insert(dir.to_path_buf(), PomInfo::default());
				true
			}
		}
	}

	///
	pub fn get(&self, dir: &Path) -> Option<&PomInfo> {
		self.projects.get(dir)
	}

	///
	pub fn is_project(&self, dir: &Path) -> bool {
		self.projects.contains_key(dir)
	}

	///
	pub fn version(&self, dir: &Path) -> Option<&str> {
		self.get(dir).and_then(PomInfo::version)
	}

	///
	pub fn len(&self) -> usize {
		self.projects.len()
	}

	///
	pub fn is_empty(&self) -> bool {
		self.projects.is_empty()
	}
}
