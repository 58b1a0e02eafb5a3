use crate::keys::{KeyBinding, KeysList};
use crossterm::event::KeyCode;

pub static TITLE_TREE: &str = "Projects";
pub static TITLE_DISABLED: &str = "Projects [labels off]";
pub static MSG_EMPTY_TREE: &str = "no directories below root";
pub static MSG_PENDING: &str = "fetching";

pub fn switch_label(name: &str, key: KeyBinding) -> String {
	format!("[{}] {name}", key_symbol(key))
}

pub fn help_line(keys: &KeysList) -> String {
	format!(
		"{} reset  {} rescan  {} quit",
		key_symbol(keys.reset_defaults),
		key_symbol(keys.rescan),
		key_symbol(keys.quit),
	)
}

pub fn pending_label(count: usize) -> String {
	format!("{MSG_PENDING} ({count})")
}

fn key_symbol(key: KeyBinding) -> String {
	match key.code {
		KeyCode::Char(c) => c.to_string(),
		KeyCode::Esc => String::from("Esc"),
		KeyCode::Enter => String::from("\u{23ce}"),
		KeyCode::Up => String::from("\u{2191}"),
		KeyCode::Down => String::from("\u{2193}"),
		other => format!("{other:?}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_labels() {
		let keys = KeysList::default();

		assert_eq!(
			switch_label("tags", keys.toggle_tags),
			"[t] tags"
		);
		assert_eq!(help_line(&keys), "r reset  R rescan  q quit");
		assert_eq!(pending_label(3), "fetching (3)");
	}
}
