use anyhow::{anyhow, Result};
use asyncinfo::{ColorField, DecoratorVariant, Toggle, DEFAULT_TTL};
use clap::{Parser, Subcommand, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::{
	fs::{self, File},
	path::PathBuf,
	time::Duration,
};

pub struct CliArgs {
	pub directory: PathBuf,
	pub variant: DecoratorVariant,
	pub settings_file: PathBuf,
	pub depth: Option<usize>,
	pub ttl: Duration,
	pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
	Tui,
	Print { color: bool },
	Toggle(Toggle),
	SetColor { field: ColorField, color: String },
	Reset,
	ShowSettings,
}

pub fn process_cmdline() -> Result<CliArgs> {
	let args = AppOptions::parse();

	if args.logging {
		setup_logging()?;
	}

	let variant = DecoratorVariant::from(args.variant);

	let settings_file = match args.settings {
		Some(file) => file,
		None => get_app_config_path()?
			.join(format!("{}.ron", variant.name())),
	};

	Ok(CliArgs {
		directory: args.directory,
		variant,
		settings_file,
		depth: args.depth,
		ttl: Duration::from_millis(args.ttl),
		mode: args.command.map_or(Mode::Tui, Mode::from),
	})
}

#[derive(Parser)]
#[command(
	author,
	version = env!("PROJINFO_BUILD_NAME"),
	about,
	help_template = "\
{before-help}projinfo {version}
{author}
{about}

{usage-heading} {usage}

{all-args}{after-help}
		"
)]
struct AppOptions {
	/// Stores logging output into a cache directory
	#[arg(short = 'l', long)]
	logging: bool,

	/// Root of the project tree
	#[arg(short = 'd', long, default_value = ".")]
	directory: PathBuf,

	/// Which decorator flavour (and settings file) to use
	#[arg(long, value_enum, default_value_t = VariantArg::Full)]
	variant: VariantArg,

	/// Use this settings file instead of the one in the config dir
	#[arg(short = 's', long, value_name = "FILE")]
	settings: Option<PathBuf>,

	/// Maximum depth of directories shown below the root
	#[arg(long)]
	depth: Option<usize>,

	/// Age in milliseconds after which git info gets refreshed
	#[arg(long, default_value_t = DEFAULT_TTL.as_millis() as u64)]
	ttl: u64,

	#[clap(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
	/// Print the annotated tree once and exit
	Print {
		/// Plain text without colors
		#[arg(long)]
		no_color: bool,
	},
	/// Flip one of the display switches
	Toggle { field: ToggleArg },
	/// Change a label color (#RRGGBB)
	SetColor { field: ColorArg, color: String },
	/// Restore the defaults of the variant
	Reset,
	/// Print the current settings
	ShowSettings,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
	Full,
	Simple,
}

#[derive(Clone, Copy, ValueEnum)]
enum ToggleArg {
	Enabled,
	Version,
	Branch,
	Tags,
	Colors,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
	Version,
	Branch,
	Tag,
}

impl From<VariantArg> for DecoratorVariant {
	fn from(arg: VariantArg) -> Self {
		match arg {
			VariantArg::Full => Self::Full,
			VariantArg::Simple => Self::Simple,
		}
	}
}

impl From<ToggleArg> for Toggle {
	fn from(arg: ToggleArg) -> Self {
		match arg {
			ToggleArg::Enabled => Self::Enabled,
			ToggleArg::Version => Self::Version,
			ToggleArg::Branch => Self::Branch,
			ToggleArg::Tags => Self::Tags,
			ToggleArg::Colors => Self::Colors,
		}
	}
}

impl From<ColorArg> for ColorField {
	fn from(arg: ColorArg) -> Self {
		match arg {
			ColorArg::Version => Self::Version,
			ColorArg::Branch => Self::Branch,
			ColorArg::Tag => Self::Tag,
		}
	}
}

impl From<Command> for Mode {
	fn from(cmd: Command) -> Self {
		match cmd {
			Command::Print { no_color } => {
				Self::Print { color: !no_color }
			}
			Command::Toggle { field } => Self::Toggle(field.into()),
			Command::SetColor { field, color } => Self::SetColor {
				field: field.into(),
				color,
			},
			Command::Reset => Self::Reset,
			Command::ShowSettings => Self::ShowSettings,
		}
	}
}

fn setup_logging() -> Result<()> {
	let mut path = get_app_cache_path()?;
	path.push("projinfo.log");

	println!("Logging enabled. log written to: {path:?}");

	WriteLogger::init(
		LevelFilter::Trace,
		Config::default(),
		File::create(path)?,
	)?;

	Ok(())
}

fn get_app_cache_path() -> Result<PathBuf> {
	let mut path = dirs::cache_dir()
		.ok_or_else(|| anyhow!("failed to find os cache dir."))?;

	path.push("projinfo");
	fs::create_dir_all(&path)?;
	Ok(path)
}

pub fn get_app_config_path() -> Result<PathBuf> {
	let mut path = if cfg!(target_os = "macos") {
		dirs::home_dir().map(|h| h.join(".config"))
	} else {
		dirs::config_dir()
	}
	.ok_or_else(|| anyhow!("failed to find os config dir."))?;

	path.push("projinfo");
	fs::create_dir_all(&path)?;
	Ok(path)
}
