use anyhow::Result;
use asyncinfo::{format::FragmentStyle, Rgb, Weight};
use ratatui::style::{Color, Modifier, Style};
use ron::de::from_bytes;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

/// colors of the tui chrome, the labels use the decorator settings.
///
/// `theme.ron` holds colors as quoted strings, either a name or hex:
/// `(selection_background: "magenta", border: "#102030")`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
	border: Color,
	title: Color,
	tree_item: Color,
	selection_background: Color,
	switch_on: Color,
	switch_off: Color,
	pending: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			border: Color::DarkGray,
			title: Color::Reset,
			tree_item: Color::Reset,
			selection_background: Color::Blue,
			switch_on: Color::Green,
			switch_off: Color::DarkGray,
			pending: Color::Yellow,
		}
	}
}

impl Theme {
	pub fn block(&self) -> Style {
		Style::default().fg(self.border)
	}

	pub fn title(&self) -> Style {
		Style::default().fg(self.title).add_modifier(Modifier::BOLD)
	}

	pub fn tree_item(&self, selected: bool) -> Style {
		let style = Style::default().fg(self.tree_item);
		self.apply_select(style, selected)
	}

	pub fn switch(&self, on: bool) -> Style {
		if on {
			Style::default().fg(self.switch_on)
		} else {
			Style::default()
				.fg(self.switch_off)
				.add_modifier(Modifier::CROSSED_OUT)
		}
	}

	pub fn pending(&self) -> Style {
		Style::default().fg(self.pending)
	}

	/// label style, keeps the selection highlight
	pub fn fragment(
		&self,
		style: FragmentStyle,
		selected: bool,
	) -> Style {
		let mut fg = Style::default().fg(ratatui_color(style.color));
		if is_bold(style) {
			fg = fg.add_modifier(Modifier::BOLD);
		}
		self.apply_select(fg, selected)
	}

	fn apply_select(&self, style: Style, selected: bool) -> Style {
		if selected {
			style.bg(self.selection_background)
		} else {
			style
		}
	}

	fn read_file(theme_file: &Path) -> Result<Self> {
		let mut f = File::open(theme_file)?;
		let mut buffer = Vec::new();
		f.read_to_end(&mut buffer)?;
		Ok(from_bytes(&buffer)?)
	}

	/// `theme_file` if present and valid, the default theme otherwise
	pub fn init(theme_file: &Path) -> Self {
		if !theme_file.exists() {
			return Self::default();
		}

		Self::read_file(theme_file).unwrap_or_else(|e| {
			log::error!(
				"theme error [{}]: {}",
				theme_file.display(),
				e
			);
			Self::default()
		})
	}
}

pub const fn is_bold(style: FragmentStyle) -> bool {
	matches!(style.weight, Weight::Bold)
}

pub const fn ratatui_color(rgb: Rgb) -> Color {
	Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub const fn crossterm_color(rgb: Rgb) -> crossterm::style::Color {
	crossterm::style::Color::Rgb {
		r: rgb.0,
		g: rgb.1,
		b: rgb.2,
	}
}
