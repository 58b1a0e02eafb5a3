use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ron::de::from_bytes;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyBinding {
	pub code: KeyCode,
	pub modifiers: KeyModifiers,
}

impl KeyBinding {
	pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
		Self { code, modifiers }
	}

	const fn plain(c: char) -> Self {
		Self::new(KeyCode::Char(c), KeyModifiers::empty())
	}
}

impl PartialEq for KeyBinding {
	fn eq(&self, other: &Self) -> bool {
		let ev: KeyEvent = self.into();
		let other: KeyEvent = other.into();
		ev == other
	}
}

impl From<&KeyBinding> for KeyEvent {
	fn from(other: &KeyBinding) -> Self {
		Self::new(other.code, other.modifiers)
	}
}

/// shift is implied by upper case chars, some terminals report it and
/// some don't
pub fn key_match(ev: &KeyEvent, binding: KeyBinding) -> bool {
	if ev.code != binding.code {
		return false;
	}

	match ev.code {
		KeyCode::Char(c) if c.is_ascii_uppercase() => {
			ev.modifiers.difference(KeyModifiers::SHIFT)
				== binding.modifiers.difference(KeyModifiers::SHIFT)
		}
		_ => ev.modifiers == binding.modifiers,
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysList {
	pub quit: KeyBinding,
	pub exit: KeyBinding,
	pub move_up: KeyBinding,
	pub move_down: KeyBinding,
	pub vim_up: KeyBinding,
	pub vim_down: KeyBinding,
	pub home: KeyBinding,
	pub end: KeyBinding,
	pub toggle_enabled: KeyBinding,
	pub toggle_version: KeyBinding,
	pub toggle_branch: KeyBinding,
	pub toggle_tags: KeyBinding,
	pub toggle_colors: KeyBinding,
	pub reset_defaults: KeyBinding,
	pub rescan: KeyBinding,
}

#[rustfmt::skip]
impl Default for KeysList {
	fn default() -> Self {
		Self {
			quit: KeyBinding::plain('q'),
			exit: KeyBinding::new(KeyCode::Esc, KeyModifiers::empty()),
			move_up: KeyBinding::new(KeyCode::Up, KeyModifiers::empty()),
			move_down: KeyBinding::new(KeyCode::Down, KeyModifiers::empty()),
			vim_up: KeyBinding::plain('k'),
			vim_down: KeyBinding::plain('j'),
			home: KeyBinding::new(KeyCode::Home, KeyModifiers::empty()),
			end: KeyBinding::new(KeyCode::End, KeyModifiers::empty()),
			toggle_enabled: KeyBinding::plain('e'),
			toggle_version: KeyBinding::plain('v'),
			toggle_branch: KeyBinding::plain('b'),
			toggle_tags: KeyBinding::plain('t'),
			toggle_colors: KeyBinding::plain('c'),
			reset_defaults: KeyBinding::plain('r'),
			rescan: KeyBinding::new(KeyCode::Char('R'), KeyModifiers::SHIFT),
		}
	}
}

impl KeysList {
	fn read_file(file: &Path) -> anyhow::Result<Self> {
		let mut f = File::open(file)?;
		let mut buffer = Vec::new();
		f.read_to_end(&mut buffer)?;
		Ok(from_bytes(&buffer)?)
	}

	/// bindings from `file`, missing entries keep their default
	pub fn init(file: &Path) -> Self {
		if !file.exists() {
			return Self::default();
		}

		Self::read_file(file).unwrap_or_else(|e| {
			log::error!(
				"key bindings error [{}]: {}",
				file.display(),
				e
			);
			Self::default()
		})
	}
}
