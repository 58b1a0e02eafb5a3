use anyhow::Result;
use asyncinfo::{
	ColorField, DecoratorConfig, DecoratorConfigFile,
	DecoratorVariant, Toggle,
};
use ron::{
	extensions::Extensions,
	ser::{to_string_pretty, PrettyConfig},
	Options,
};
use std::{
	fs::File,
	io::{Read, Write},
	path::{Path, PathBuf},
};

/// decorator configuration bound to its settings file.
/// every mutation is written back right away
pub struct Settings {
	file: PathBuf,
	config: DecoratorConfig,
}

impl Settings {
	/// reads `file`, falls back to the defaults of `variant` if it is
	/// missing or unreadable
	pub fn load(file: PathBuf, variant: DecoratorVariant) -> Self {
		let mut config = DecoratorConfig::new(variant);

		match Self::read(&file) {
			Ok(stored) => {
				config.apply(stored);
				let repaired = config.repair_colors();
				if !repaired.is_empty() {
					log::warn!(
						"settings: invalid colors replaced: {:?}",
						repaired
					);
				}
			}
			Err(e) => {
				log::info!(
					"settings: using defaults ({}): {}",
					file.display(),
					e
				);
			}
		}

		Self { file, config }
	}

	pub const fn config(&self) -> &DecoratorConfig {
		&self.config
	}

	pub fn file(&self) -> &Path {
		&self.file
	}

	pub fn toggle(&mut self, toggle: Toggle) {
		self.config.toggle(toggle);
		self.save();
	}

	pub fn set_color(
		&mut self,
		field: ColorField,
		hex: &str,
	) -> Result<()> {
		self.config.set_color(field, hex)?;
		self.save();
		Ok(())
	}

	pub fn reset_to_defaults(&mut self) {
		self.config.reset_to_defaults();
		self.save();
	}

	fn save(&self) {
		if let Err(e) = self.save_failable() {
			log::error!("settings save error: {}", e);
		}
	}

	fn read(file: &Path) -> Result<DecoratorConfigFile> {
		let mut f = File::open(file)?;
		let mut buffer = Vec::new();
		f.read_to_end(&mut buffer)?;

		// files hold plain values, not `Some(..)`
		let options = Options::default()
			.with_default_extension(Extensions::IMPLICIT_SOME);
		Ok(options.from_bytes(&buffer)?)
	}

	fn save_failable(&self) -> Result<()> {
		let mut file = File::create(&self.file)?;
		let data =
			to_string_pretty(&self.config, PrettyConfig::default())?;
		file.write_all(data.as_bytes())?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_missing_file_defaults() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("simple.ron");

		let settings = Settings::load(file, DecoratorVariant::Simple);

		assert_eq!(
			settings.config(),
			&DecoratorConfig::new(DecoratorVariant::Simple)
		);
	}

	#[test]
	fn test_mutations_persist() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("full.ron");

		let mut settings =
			Settings::load(file.clone(), DecoratorVariant::Full);
		settings.toggle(Toggle::Branch);
		settings.set_color(ColorField::Tag, "#010203").unwrap();
		assert!(settings.set_color(ColorField::Tag, "red").is_err());

		let reloaded = Settings::load(file, DecoratorVariant::Full);
		assert!(reloaded.config().show_branch);
		assert_eq!(reloaded.config().tag_color, "#010203");
	}

	#[test]
	fn test_reset_persists() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("full.ron");

		let mut settings =
			Settings::load(file.clone(), DecoratorVariant::Full);
		settings.toggle(Toggle::Enabled);
		settings.toggle(Toggle::Colors);
		settings.reset_to_defaults();

		let reloaded = Settings::load(file, DecoratorVariant::Full);
		assert_eq!(
			reloaded.config(),
			&DecoratorConfig::new(DecoratorVariant::Full)
		);
	}

	#[test]
	fn test_malformed_colors_repaired() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("full.ron");
		fs::write(
			&file,
			r##"(
				show_branch: true,
				version_color: "green",
				branch_color: "#123456",
			)"##,
		)
		.unwrap();

		let settings = Settings::load(file, DecoratorVariant::Full);

		assert!(settings.config().show_branch);
		assert_eq!(settings.config().version_color, "#6A8759");
		assert_eq!(settings.config().branch_color, "#123456");
		assert_eq!(settings.config().tag_color, "#6897BB");
	}

	#[test]
	fn test_partial_file_keeps_variant_defaults() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("simple.ron");
		fs::write(&file, "(show_branch: true)").unwrap();

		let settings = Settings::load(file, DecoratorVariant::Simple);

		let mut expected =
			DecoratorConfig::new(DecoratorVariant::Simple);
		expected.show_branch = true;
		assert_eq!(settings.config(), &expected);
		assert_eq!(settings.config().version_color, "#CC7832");
		assert_eq!(settings.config().branch_color, "#6897BB");
	}

	#[test]
	fn test_stored_variant_is_ignored() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("simple.ron");
		fs::write(&file, "(variant: Full, show_tags: true)").unwrap();

		let settings = Settings::load(file, DecoratorVariant::Simple);

		let config = settings.config();
		assert_eq!(config.variant, DecoratorVariant::Simple);
		assert!(config.show_tags);
		assert_eq!(settings.config().version_color, "#CC7832");
	}

	#[test]
	fn test_garbage_file_defaults() {
		let td = TempDir::new().unwrap();
		let file = td.path().join("simple.ron");
		fs::write(&file, "not ron at all {").unwrap();

		let settings = Settings::load(file, DecoratorVariant::Simple);

		assert_eq!(
			settings.config(),
			&DecoratorConfig::new(DecoratorVariant::Simple)
		);
	}
}
