//! decorator configuration: toggles, colors and their variant defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// the two historic flavours of the decorator, they differ in defaults
#[derive(
	Debug,
	Default,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Serialize,
	Deserialize,
)]
pub enum DecoratorVariant {
	/// maven projects only, version plus branch/tag of the enclosing repo
	#[default]
	Full,
	/// version and branch decorate independently, repo roots only
	Simple,
}

impl DecoratorVariant {
	///
	pub const fn name(self) -> &'static str {
		match self {
			Self::Full => "full",
			Self::Simple => "simple",
		}
	}

	/// how a directory is mapped to its repository
	pub const fn repo_lookup(self) -> RepoLookup {
		match self {
			Self::Full => RepoLookup::Discover,
			Self::Simple => RepoLookup::Root,
		}
	}

	/// if `true` only directories with build metadata get decorated
	pub const fn requires_build_metadata(self) -> bool {
		matches!(self, Self::Full)
	}

	const fn default_version_color(self) -> &'static str {
		match self {
			Self::Full => "#6A8759",
			Self::Simple => "#CC7832",
		}
	}

	const fn default_branch_color(self) -> &'static str {
		match self {
			Self::Full => "#CC7832",
			Self::Simple => "#6897BB",
		}
	}

	const fn default_tag_color(self) -> &'static str {
		"#6897BB"
	}

	/// default literal of a color field
	pub const fn default_color(
		self,
		field: ColorField,
	) -> &'static str {
		match field {
			ColorField::Version => self.default_version_color(),
			ColorField::Branch => self.default_branch_color(),
			ColorField::Tag => self.default_tag_color(),
		}
	}
}

/// how a subject directory is associated with a git repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepoLookup {
	/// the directory must be the work tree root
	Root,
	/// any directory inside a work tree
	Discover,
}

/// 24bit color, persisted as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// neutral color used for separators and when colors are off
	pub const GRAY: Self = Self(0x80, 0x80, 0x80);

	///
	pub fn from_hex(hex: &str) -> Result<Self> {
		let invalid = || Error::InvalidColor(hex.to_string());

		let digits =
			hex.trim().strip_prefix('#').ok_or_else(invalid)?;
		if digits.len() != 6
			|| !digits.bytes().all(|b| b.is_ascii_hexdigit())
		{
			return Err(invalid());
		}

		let channel = |range: std::ops::Range<usize>| {
			u8::from_str_radix(&digits[range], 16)
				.map_err(|_| invalid())
		};

		Ok(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
	}
}

impl FromStr for Rgb {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::from_hex(s)
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
	}
}

///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
	///
	Version,
	///
	Branch,
	///
	Tag,
}

impl ColorField {
	/// every field, in display order
	pub const ALL: [Self; 3] =
		[Self::Version, Self::Branch, Self::Tag];
}

///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
	/// master switch
	Enabled,
	///
	Version,
	///
	Branch,
	///
	Tags,
	///
	Colors,
}

/// one decorator's settings, owned by the caller.
/// colors are kept as the persisted hex strings and parsed on use.
/// read back through [`DecoratorConfigFile`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoratorConfig {
	///
	pub variant: DecoratorVariant,
	///
	pub enabled: bool,
	///
	pub show_version: bool,
	///
	pub show_branch: bool,
	///
	pub show_tags: bool,
	///
	pub use_colors: bool,
	///
	pub version_color: String,
	///
	pub branch_color: String,
	///
	pub tag_color: String,
}

impl Default for DecoratorConfig {
	fn default() -> Self {
		Self::new(DecoratorVariant::default())
	}
}

impl DecoratorConfig {
	/// defaults of `variant`
	pub fn new(variant: DecoratorVariant) -> Self {
		let mut config = Self {
			variant,
			enabled: true,
			show_version: true,
			show_branch: false,
			show_tags: false,
			use_colors: true,
			version_color: String::new(),
			branch_color: String::new(),
			tag_color: String::new(),
		};
		config.reset_to_defaults();
		config
	}

	/// restores every toggle and color of the current variant
	pub fn reset_to_defaults(&mut self) {
		let variant = self.variant;

		self.enabled = true;
		self.show_version = true;
		self.show_branch = false;
		self.show_tags = false;
		self.use_colors = true;
		self.version_color =
			variant.default_color(ColorField::Version).to_string();
		self.branch_color =
			variant.default_color(ColorField::Branch).to_string();
		self.tag_color =
			variant.default_color(ColorField::Tag).to_string();
	}

	///
	pub fn toggle(&mut self, toggle: Toggle) {
		let flag = match toggle {
			Toggle::Enabled => &mut self.enabled,
			Toggle::Version => &mut self.show_version,
			Toggle::Branch => &mut self.show_branch,
			Toggle::Tags => &mut self.show_tags,
			Toggle::Colors => &mut self.use_colors,
		};
		*flag = !*flag;
	}

	///
	pub const fn is_set(&self, toggle: Toggle) -> bool {
		match toggle {
			Toggle::Enabled => self.enabled,
			Toggle::Version => self.show_version,
			Toggle::Branch => self.show_branch,
			Toggle::Tags => self.show_tags,
			Toggle::Colors => self.use_colors,
		}
	}

	/// the persisted string of `field`
	pub fn color_hex(&self, field: ColorField) -> &str {
		match field {
			ColorField::Version => &self.version_color,
			ColorField::Branch => &self.branch_color,
			ColorField::Tag => &self.tag_color,
		}
	}

	/// parsed color of `field`, the variant default if the stored
	/// value is malformed
	pub fn color(&self, field: ColorField) -> Rgb {
		let hex = self.color_hex(field);
		Rgb::from_hex(hex).unwrap_or_else(|e| {
			log::warn!("{field:?} color: {e}");
			self.default_rgb(field)
		})
	}

	/// validates `hex` before storing it (normalized to upper case)
	pub fn set_color(
		&mut self,
		field: ColorField,
		hex: &str,
	) -> Result<()> {
		let value = Rgb::from_hex(hex)?.to_string();

		match field {
			ColorField::Version => self.version_color = value,
			ColorField::Branch => self.branch_color = value,
			ColorField::Tag => self.tag_color = value,
		}

		Ok(())
	}

	/// replaces malformed colors by their defaults,
	/// returns the fields that were repaired
	pub fn repair_colors(&mut self) -> Vec<ColorField> {
		let mut repaired = Vec::new();

		for field in ColorField::ALL {
			if let Err(e) = Rgb::from_hex(self.color_hex(field)) {
				log::warn!("repairing {field:?} color: {e}");
				let default =
					self.variant.default_color(field).to_string();
				match field {
					ColorField::Version => {
						self.version_color = default;
					}
					ColorField::Branch => self.branch_color = default,
					ColorField::Tag => self.tag_color = default,
				}
				repaired.push(field);
			}
		}

		repaired
	}

	/// `true` if any git fragment can be shown, otherwise no fetch is
	/// worth scheduling
	pub const fn fetches_git(&self) -> bool {
		self.enabled && (self.show_branch || self.show_tags)
	}

	/// tags are slow to compute, only look them up if shown
	pub const fn fetches_tags(&self) -> bool {
		self.enabled && self.show_tags
	}

	/// takes every field present in `file`, the rest stays as is
	pub fn apply(&mut self, file: DecoratorConfigFile) {
		let DecoratorConfigFile {
			enabled,
			show_version,
			show_branch,
			show_tags,
			use_colors,
			version_color,
			branch_color,
			tag_color,
		} = file;

		self.enabled = enabled.unwrap_or(self.enabled);
		self.show_version = show_version.unwrap_or(self.show_version);
		self.show_branch = show_branch.unwrap_or(self.show_branch);
		self.show_tags = show_tags.unwrap_or(self.show_tags);
		self.use_colors = use_colors.unwrap_or(self.use_colors);

		if let Some(color) = version_color {
			self.version_color = color;
		}
		if let Some(color) = branch_color {
			self.branch_color = color;
		}
		if let Some(color) = tag_color {
			self.tag_color = color;
		}
	}

	fn default_rgb(&self, field: ColorField) -> Rgb {
		Rgb::from_hex(self.variant.default_color(field))
			.unwrap_or(Rgb::GRAY)
	}
}

/// persisted form of a [`DecoratorConfig`], every field optional so a
/// partial file falls back to the defaults of the variant it is loaded
/// for. the stored `variant` is ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoratorConfigFile {
	///
	pub enabled: Option<bool>,
	///
	pub show_version: Option<bool>,
	///
	pub show_branch: Option<bool>,
	///
	pub show_tags: Option<bool>,
	///
	pub use_colors: Option<bool>,
	///
	pub version_color: Option<String>,
	///
	pub branch_color: Option<String>,
	///
	pub tag_color: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_full_defaults() {
		let config = DecoratorConfig::new(DecoratorVariant::Full);

		assert!(config.enabled);
		assert!(config.show_version);
		assert!(!config.show_branch);
		assert!(!config.show_tags);
		assert!(config.use_colors);
		assert_eq!(config.version_color, "#6A8759");
		assert_eq!(config.branch_color, "#CC7832");
		assert_eq!(config.tag_color, "#6897BB");
	}

	#[test]
	fn test_simple_defaults() {
		let config = DecoratorConfig::new(DecoratorVariant::Simple);

		assert_eq!(config.version_color, "#CC7832");
		assert_eq!(config.branch_color, "#6897BB");
		assert_eq!(config.tag_color, "#6897BB");
		assert_eq!(config.variant.repo_lookup(), RepoLookup::Root);
	}

	#[test]
	fn test_reset_restores_literals() {
		for variant in
			[DecoratorVariant::Full, DecoratorVariant::Simple]
		{
			let mut config = DecoratorConfig::new(variant);

			config.toggle(Toggle::Enabled);
			config.toggle(Toggle::Version);
			config.toggle(Toggle::Branch);
			config.toggle(Toggle::Tags);
			config.toggle(Toggle::Colors);
			config.set_color(ColorField::Version, "#000000").unwrap();
			config.set_color(ColorField::Branch, "#111111").unwrap();
			config.tag_color = String::from("garbage");

			config.reset_to_defaults();

			assert_eq!(config, DecoratorConfig::new(variant));
		}
	}

	#[test]
	fn test_rgb_parse() {
		assert_eq!(
			Rgb::from_hex("#6A8759").unwrap(),
			Rgb(0x6a, 0x87, 0x59)
		);
		assert_eq!(
			Rgb::from_hex("#cc7832").unwrap(),
			Rgb(0xcc, 0x78, 0x32)
		);
		assert_eq!(Rgb(0xcc, 0x78, 0x32).to_string(), "#CC7832");

		assert!(Rgb::from_hex("6A8759").is_err());
		assert!(Rgb::from_hex("#6A875").is_err());
		assert!(Rgb::from_hex("#6A87ZZ").is_err());
		assert!(Rgb::from_hex("#ÄÄÄÄ").is_err());
		assert!(Rgb::from_hex("").is_err());
	}

	#[test]
	fn test_rgb_rejects_signs() {
		assert!(Rgb::from_hex("#+1+2+3").is_err());
		assert!(Rgb::from_hex("#-1-2-3").is_err());
		assert!(Rgb::from_hex("# 12345").is_err());
	}

	#[test]
	fn test_apply_partial_file() {
		let mut config =
			DecoratorConfig::new(DecoratorVariant::Simple);

		config.apply(DecoratorConfigFile {
			show_branch: Some(true),
			tag_color: Some(String::from("#010203")),
			..DecoratorConfigFile::default()
		});

		assert!(config.show_branch);
		assert!(config.show_version);
		assert_eq!(config.version_color, "#CC7832");
		assert_eq!(config.branch_color, "#6897BB");
		assert_eq!(config.tag_color, "#010203");
	}

	#[test]
	fn test_malformed_color_falls_back() {
		let mut config = DecoratorConfig::new(DecoratorVariant::Full);
		config.branch_color = String::from("orange");

		assert_eq!(
			config.color(ColorField::Branch),
			Rgb(0xcc, 0x78, 0x32)
		);

		assert_eq!(config.repair_colors(), vec![ColorField::Branch]);
		assert_eq!(config.branch_color, "#CC7832");
		assert!(config.repair_colors().is_empty());
	}

	#[test]
	fn test_set_color_rejects_invalid() {
		let mut config =
			DecoratorConfig::new(DecoratorVariant::Simple);

		assert!(config.set_color(ColorField::Tag, "blue").is_err());
		assert_eq!(config.tag_color, "#6897BB");

		config.set_color(ColorField::Tag, "#abcdef").unwrap();
		assert_eq!(config.tag_color, "#ABCDEF");
	}

	#[test]
	fn test_fetch_flags() {
		let mut config = DecoratorConfig::new(DecoratorVariant::Full);
		assert!(!config.fetches_git());

		config.toggle(Toggle::Branch);
		assert!(config.fetches_git());
		assert!(!config.fetches_tags());

		config.toggle(Toggle::Tags);
		config.toggle(Toggle::Enabled);
		assert!(!config.fetches_git());
		assert!(!config.fetches_tags());
	}
}
