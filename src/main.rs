//! projinfo shows a directory tree annotated with maven versions and
//! the git branch/tag of each project

#![forbid(unsafe_code)]
#![deny(
	unused_imports,
	unused_must_use,
	dead_code,
	unstable_name_collisions,
	unused_assignments
)]
#![deny(clippy::all, clippy::perf)]
#![cfg_attr(
	not(test),
	deny(clippy::unwrap_used, clippy::expect_used)
)]
#![allow(
	clippy::module_name_repetitions,
	clippy::new_without_default
)]

mod app;
mod args;
mod decorator;
mod input;
mod keys;
mod print;
mod settings;
mod strings;
mod tree;
mod ui;

use crate::{
	app::App,
	args::{get_app_config_path, process_cmdline, CliArgs, Mode},
	decorator::Decorator,
	input::{Input, InputEvent},
	keys::KeysList,
	print::{print_tree, warm_up},
	settings::Settings,
	tree::ProjectTree,
	ui::style::Theme,
};
use anyhow::{anyhow, Result};
use asyncinfo::{InfoCache, InfoNotification, RefreshCoordinator};
use crossbeam_channel::{select, tick, unbounded, Receiver};
use crossterm::{
	terminal::{
		disable_raw_mode, enable_raw_mode, EnterAlternateScreen,
		LeaveAlternateScreen,
	},
	ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scopetime::scope_time;
use std::{
	io::{self, Stdout},
	panic,
	time::Duration,
};

static TICK_INTERVAL: Duration = Duration::from_secs(5);
static MIN_TICK_INTERVAL: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<Stdout>>;

///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueueEvent {
	Tick,
	Info(InfoNotification),
	Input(InputEvent),
}

fn main() -> Result<()> {
	let cliargs = process_cmdline()?;

	log::info!(
		"projinfo {} ({:?} variant)",
		env!("PROJINFO_BUILD_NAME"),
		cliargs.variant
	);

	let settings = Settings::load(
		cliargs.settings_file.clone(),
		cliargs.variant,
	);

	match cliargs.mode.clone() {
		Mode::Tui => run_tui(&cliargs, settings),
		Mode::Print { color } => {
			run_print(&cliargs, &settings, color)
		}
		Mode::Toggle(toggle) => {
			let mut settings = settings;
			settings.toggle(toggle);
			show_settings(&settings)
		}
		Mode::SetColor { field, color } => {
			let mut settings = settings;
			settings.set_color(field, &color)?;
			show_settings(&settings)
		}
		Mode::Reset => {
			let mut settings = settings;
			settings.reset_to_defaults();
			show_settings(&settings)
		}
		Mode::ShowSettings => show_settings(&settings),
	}
}

fn new_decorator(
	cliargs: &CliArgs,
) -> (Decorator, Receiver<InfoNotification>) {
	let (tx_info, rx_info) = unbounded();
	let coordinator =
		RefreshCoordinator::new(InfoCache::new(), &tx_info)
			.with_ttl(cliargs.ttl);

	(Decorator::new(coordinator), rx_info)
}

fn run_print(
	cliargs: &CliArgs,
	settings: &Settings,
	color: bool,
) -> Result<()> {
	let tree = ProjectTree::scan(&cliargs.directory, cliargs.depth)?;
	let (decorator, rx_info) = new_decorator(cliargs);
	let config = settings.config();

	let timeout = decorator
		.coordinator()
		.deadline()
		.unwrap_or(asyncinfo::DEFAULT_DEADLINE);
	warm_up(&tree, &decorator, config, &rx_info, timeout);

	let mut out = io::stdout().lock();
	print_tree(&mut out, &tree, &decorator, config, color)
}

fn show_settings(settings: &Settings) -> Result<()> {
	let data = ron::ser::to_string_pretty(
		settings.config(),
		ron::ser::PrettyConfig::default(),
	)?;

	println!("# {}", settings.file().display());
	println!("{data}");

	Ok(())
}

fn run_tui(cliargs: &CliArgs, settings: Settings) -> Result<()> {
	let tree = ProjectTree::scan(&cliargs.directory, cliargs.depth)?;
	let (decorator, rx_info) = new_decorator(cliargs);

	let config_path = get_app_config_path()?;
	let theme = Theme::init(&config_path.join("theme.ron"));
	let keys = KeysList::init(&config_path.join("key_bindings.ron"));

	setup_terminal()?;
	set_panic_handler();

	let mut terminal = start_terminal(io::stdout())?;

	let mut app = App::new(
		tree,
		cliargs.depth,
		settings,
		decorator,
		keys,
		theme,
	);

	let input = Input::new();
	let rx_input = input.receiver();
	let rx_ticker = tick(tick_interval(cliargs.ttl));

	let result = run_app(
		&mut app,
		&mut terminal,
		&rx_input,
		&rx_info,
		&rx_ticker,
	);

	shutdown_terminal()?;

	result
}

fn run_app(
	app: &mut App,
	terminal: &mut Term,
	rx_input: &Receiver<InputEvent>,
	rx_info: &Receiver<InfoNotification>,
	rx_ticker: &Receiver<std::time::Instant>,
) -> Result<()> {
	draw(terminal, app)?;

	loop {
		let event = select_event(rx_input, rx_info, rx_ticker)?;

		{
			scope_time!("loop");

			match event {
				QueueEvent::Input(ev) => app.event(ev)?,
				QueueEvent::Info(ev) => app.update_async(ev),
				QueueEvent::Tick => app.update(),
			}

			if app.is_quit() {
				break;
			}

			draw(terminal, app)?;
		}
	}

	Ok(())
}

fn select_event(
	rx_input: &Receiver<InputEvent>,
	rx_info: &Receiver<InfoNotification>,
	rx_ticker: &Receiver<std::time::Instant>,
) -> Result<QueueEvent> {
	let ev = select! {
		// a dead input thread leaves no way to quit
		recv(rx_input) -> ev => QueueEvent::Input(
			ev.map_err(|_| anyhow!("input thread gone"))?,
		),
		recv(rx_info) -> ev => ev.map_or_else(
			|_| {
				log::warn!("info channel closed");
				QueueEvent::Tick
			},
			QueueEvent::Info,
		),
		recv(rx_ticker) -> _ => QueueEvent::Tick,
	};

	Ok(ev)
}

/// stale entries are only re-requested on ticks, so a short ttl
/// needs ticks at least as frequent
fn tick_interval(ttl: Duration) -> Duration {
	ttl.clamp(MIN_TICK_INTERVAL, TICK_INTERVAL)
}

fn draw(terminal: &mut Term, app: &App) -> Result<()> {
	terminal.draw(|f| app.draw(f))?;

	Ok(())
}

fn setup_terminal() -> Result<()> {
	enable_raw_mode()?;
	io::stdout().execute(EnterAlternateScreen)?;
	Ok(())
}

fn shutdown_terminal() -> Result<()> {
	io::stdout().execute(LeaveAlternateScreen)?;
	disable_raw_mode()?;
	Ok(())
}

fn start_terminal(buf: Stdout) -> Result<Term> {
	let backend = CrosstermBackend::new(buf);
	let mut terminal = Terminal::new(backend)?;
	terminal.hide_cursor()?;
	terminal.clear()?;

	Ok(terminal)
}

fn set_panic_handler() {
	panic::set_hook(Box::new(|e| {
		let backtrace = std::backtrace::Backtrace::force_capture();
		log::error!("panic: {e}\ntrace:\n{backtrace}");

		if let Err(e) = shutdown_terminal() {
			eprintln!("shutdown failed: {e}");
		}
		eprintln!("{e}");
	}));
}
