use crate::{
	decorator::Decorator,
	input::InputEvent,
	keys::{key_match, KeyBinding, KeysList},
	settings::Settings,
	strings,
	tree::{ProjectTree, TreeNode},
	ui::{self, style::Theme},
};
use anyhow::Result;
use asyncinfo::{DecoratorConfig, InfoNotification, Toggle};
use crossterm::event::KeyEvent;
use ratatui::{
	layout::Rect,
	text::{Line, Span},
	widgets::{Block, Borders, Paragraph},
	Frame,
};
use std::cell::Cell;

const INDENT: &str = "  ";
const SWITCHES: [Toggle; 5] = [
	Toggle::Enabled,
	Toggle::Version,
	Toggle::Branch,
	Toggle::Tags,
	Toggle::Colors,
];

/// interactive tree view
pub struct App {
	tree: ProjectTree,
	max_depth: Option<usize>,
	settings: Settings,
	decorator: Decorator,
	keys: KeysList,
	theme: Theme,
	selection: usize,
	scroll_top: Cell<usize>,
	do_quit: bool,
}

impl App {
	///
	pub fn new(
		tree: ProjectTree,
		max_depth: Option<usize>,
		settings: Settings,
		decorator: Decorator,
		keys: KeysList,
		theme: Theme,
	) -> Self {
		let app = Self {
			tree,
			max_depth,
			settings,
			decorator,
			keys,
			theme,
			selection: 0,
			scroll_top: Cell::new(0),
			do_quit: false,
		};

		app.request_all();

		app
	}

	///
	pub const fn is_quit(&self) -> bool {
		self.do_quit
	}

	/// periodic refresh, only stale or missing entries get fetched
	pub fn update(&mut self) {
		self.request_all();
	}

	///
	pub fn update_async(&mut self, ev: InfoNotification) {
		log::trace!(
			"update_async: {:?} (pending: {})",
			ev,
			self.decorator.coordinator().pending()
		);
	}

	///
	pub fn event(&mut self, ev: InputEvent) -> Result<()> {
		if let InputEvent::Key(key) = ev {
			self.key_event(&key)?;
		}

		Ok(())
	}

	fn key_event(&mut self, key: &KeyEvent) -> Result<()> {
		let k = &self.keys;

		if key_match(key, k.quit) || key_match(key, k.exit) {
			self.do_quit = true;
		} else if key_match(key, k.move_up)
			|| key_match(key, k.vim_up)
		{
			self.selection = self.selection.saturating_sub(1);
		} else if key_match(key, k.move_down)
			|| key_match(key, k.vim_down)
		{
			self.select(self.selection.saturating_add(1));
		} else if key_match(key, k.home) {
			self.selection = 0;
		} else if key_match(key, k.end) {
			self.select(usize::MAX);
		} else if key_match(key, k.reset_defaults) {
			self.settings.reset_to_defaults();
			self.request_all();
		} else if key_match(key, k.rescan) {
			self.rescan()?;
		} else if let Some(toggle) = self.toggle_for(key) {
			self.settings.toggle(toggle);
			self.request_all();
		}

		Ok(())
	}

	fn toggle_for(&self, key: &KeyEvent) -> Option<Toggle> {
		SWITCHES
			.into_iter()
			.find(|t| key_match(key, self.toggle_key(*t)))
	}

	const fn toggle_key(&self, toggle: Toggle) -> KeyBinding {
		match toggle {
			Toggle::Enabled => self.keys.toggle_enabled,
			Toggle::Version => self.keys.toggle_version,
			Toggle::Branch => self.keys.toggle_branch,
			Toggle::Tags => self.keys.toggle_tags,
			Toggle::Colors => self.keys.toggle_colors,
		}
	}

	fn select(&mut self, idx: usize) {
		self.selection = idx.min(self.tree.len().saturating_sub(1));
	}

	fn rescan(&mut self) -> Result<()> {
		let selected = self.selected_node().map(|n| n.path.clone());

		self.tree =
			ProjectTree::scan(self.tree.root(), self.max_depth)?;

		let idx = selected
			.and_then(|path| {
				self.tree.nodes().iter().position(|n| n.path == path)
			})
			.unwrap_or(0);
		self.select(idx);
		self.request_all();

		Ok(())
	}

	fn request_all(&self) {
		self.decorator
			.request_all(&self.tree, self.settings.config());
	}

	fn selected_node(&self) -> Option<&TreeNode> {
		self.tree.nodes().get(self.selection)
	}

	///
	pub fn draw(&self, f: &mut Frame) {
		let (tree_area, status_area) = ui::tree_and_status(f.area());

		self.draw_tree(f, tree_area);
		self.draw_status(f, status_area);
	}

	fn draw_tree(&self, f: &mut Frame, r: Rect) {
		let config = self.settings.config();
		let title = if config.enabled {
			strings::TITLE_TREE
		} else {
			strings::TITLE_DISABLED
		};

		let height = usize::from(r.height.saturating_sub(2));
		let scroll_top = ui::scroll_offset(
			self.scroll_top.get(),
			self.selection,
			height,
		);
		self.scroll_top.set(scroll_top);

		let lines: Vec<Line> = if self.tree.is_empty() {
			vec![Line::from(strings::MSG_EMPTY_TREE)]
		} else {
			self.tree
				.nodes()
				.iter()
				.enumerate()
				.skip(scroll_top)
				.take(height)
				.map(|(idx, node)| {
					let selected = idx == self.selection;
					self.node_line(node, config, selected)
				})
				.collect()
		};

		let block = Block::default()
			.title(Span::styled(title, self.theme.title()))
			.borders(Borders::ALL)
			.border_style(self.theme.block());

		f.render_widget(Paragraph::new(lines).block(block), r);
	}

	fn node_line(
		&self,
		node: &TreeNode,
		config: &DecoratorConfig,
		selected: bool,
	) -> Line<'static> {
		let mut spans = vec![Span::styled(
			format!("{}{}", INDENT.repeat(node.depth), node.name),
			self.theme.tree_item(selected),
		)];

		let decoration =
			self.decorator.decorate(&self.tree, node, config);
		if !decoration.is_empty() {
			let style = self.theme.tree_item(selected);
			spans.push(Span::styled(" ", style));
		}

		spans.extend(decoration.segments().into_iter().map(|segment| {
			Span::styled(
				segment.text.to_string(),
				self.theme.fragment(segment.style, selected),
			)
		}));

		Line::from(spans)
	}

	fn draw_status(&self, f: &mut Frame, r: Rect) {
		let config = self.settings.config();
		let mut spans = Vec::new();

		for toggle in SWITCHES {
			spans.push(Span::styled(
				strings::switch_label(
					toggle_name(toggle),
					self.toggle_key(toggle),
				),
				self.theme.switch(config.is_set(toggle)),
			));
			spans.push(Span::raw(" "));
		}

		let pending = self.decorator.coordinator().pending();
		if pending > 0 {
			spans.push(Span::styled(
				strings::pending_label(pending),
				self.theme.pending(),
			));
			spans.push(Span::raw(" "));
		}

		spans.push(Span::raw(strings::help_line(&self.keys)));

		f.render_widget(Paragraph::new(Line::from(spans)), r);
	}
}

const fn toggle_name(toggle: Toggle) -> &'static str {
	match toggle {
		Toggle::Enabled => "enabled",
		Toggle::Version => "version",
		Toggle::Branch => "branch",
		Toggle::Tags => "tags",
		Toggle::Colors => "colors",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use asyncinfo::{
		DecoratorVariant, InfoCache, InfoSnapshot, RefreshCoordinator,
	};
	use crossbeam_channel::unbounded;
	use crossterm::event::{KeyCode, KeyModifiers};
	use pretty_assertions::assert_eq;
	use ratatui::{backend::TestBackend, Terminal};
	use std::{fs, path::Path};
	use tempfile::TempDir;

	fn write_pom(dir: &Path, version: &str) {
		fs::create_dir_all(dir).unwrap();
		fs::write(
			dir.join("pom.xml"),
			format!(
				"<project><version>{version}</version></project>"
			),
		)
		.unwrap();
	}

	fn setup(td: &TempDir) -> App {
		let tree = ProjectTree::scan(td.path(), None).unwrap();
		let (tx, _rx) = unbounded();
		let decorator = Decorator::new(RefreshCoordinator::new(
			InfoCache::new(),
			&tx,
		));
		let settings = Settings::load(
			td.path().join("settings.ron"),
			DecoratorVariant::Full,
		);

		App::new(
			tree,
			None,
			settings,
			decorator,
			KeysList::default(),
			Theme::default(),
		)
	}

	fn press(app: &mut App, c: char) {
		let modifiers = if c.is_ascii_uppercase() {
			KeyModifiers::SHIFT
		} else {
			KeyModifiers::empty()
		};
		app.event(InputEvent::Key(KeyEvent::new(
			KeyCode::Char(c),
			modifiers,
		)))
		.unwrap();
	}

	fn render(app: &App) -> Vec<String> {
		let mut terminal =
			Terminal::new(TestBackend::new(80, 8)).unwrap();
		terminal.draw(|f| app.draw(f)).unwrap();

		let buffer = terminal.backend().buffer();
		let width = usize::from(buffer.area.width);
		buffer
			.content()
			.chunks(width)
			.map(|row| {
				row.iter()
					.map(|cell| cell.symbol())
					.collect::<String>()
			})
			.collect()
	}

	#[test]
	fn test_draws_versions() {
		let td = TempDir::new().unwrap();
		write_pom(&td.path().join("service"), "1.4.0");
		fs::create_dir(td.path().join("docs")).unwrap();

		let app = setup(&td);
		let rows = render(&app);

		assert!(rows[0].contains(strings::TITLE_TREE));
		assert!(rows.iter().any(|r| r.contains("service v1.4.0")));
		assert!(rows.iter().any(|r| r.contains("docs")));
		assert!(rows[7].contains("[e] enabled"));
	}

	#[test]
	fn test_cached_git_info_is_drawn() {
		let td = TempDir::new().unwrap();
		let service = td.path().join("service");
		write_pom(&service, "1.4.0");

		let mut app = setup(&td);
		// fresh entry, so the toggle does not schedule a fetch
		app.decorator.coordinator().cache().put(
			service.canonicalize().unwrap(),
			InfoSnapshot::new(Some(String::from("dev")), None),
		);
		press(&mut app, 'b');

		let rows = render(&app);

		assert!(rows
			.iter()
			.any(|r| r.contains("service (v1.4.0 | \u{2387} dev)")));
	}

	#[test]
	fn test_toggle_persists() {
		let td = TempDir::new().unwrap();
		let mut app = setup(&td);

		press(&mut app, 't');
		assert!(app.settings.config().show_tags);

		let reloaded = Settings::load(
			td.path().join("settings.ron"),
			DecoratorVariant::Full,
		);
		assert!(reloaded.config().show_tags);

		press(&mut app, 'r');
		assert!(!app.settings.config().show_tags);
	}

	#[test]
	fn test_disabled_hides_labels() {
		let td = TempDir::new().unwrap();
		write_pom(&td.path().join("service"), "1.4.0");

		let mut app = setup(&td);
		press(&mut app, 'e');

		let rows = render(&app);
		assert!(rows[0].contains(strings::TITLE_DISABLED));
		assert!(!rows.iter().any(|r| r.contains("v1.4.0")));
	}

	#[test]
	fn test_navigation_is_clamped() {
		let td = TempDir::new().unwrap();
		fs::create_dir(td.path().join("a")).unwrap();

		let mut app = setup(&td);
		press(&mut app, 'k');
		assert_eq!(app.selection, 0);

		press(&mut app, 'j');
		press(&mut app, 'j');
		press(&mut app, 'j');
		assert_eq!(app.selection, 1);
	}

	#[test]
	fn test_rescan_keeps_selection() {
		let td = TempDir::new().unwrap();
		fs::create_dir(td.path().join("b")).unwrap();

		let mut app = setup(&td);
		press(&mut app, 'j');
		assert_eq!(app.selected_node().unwrap().name, "b");

		fs::create_dir(td.path().join("a")).unwrap();
		press(&mut app, 'R');

		assert_eq!(app.tree.len(), 3);
		assert_eq!(app.selected_node().unwrap().name, "b");
	}

	#[test]
	fn test_quit() {
		let td = TempDir::new().unwrap();
		let mut app = setup(&td);

		assert!(!app.is_quit());
		press(&mut app, 'q');
		assert!(app.is_quit());
	}
}
