//! turns a snapshot plus build version into styled label fragments.
//!
//! one fragment renders as is, several are wrapped in parentheses and
//! joined by [`SEPARATOR`]. both are drawn in the neutral style.

use crate::{
	cache::InfoSnapshot,
	config::{ColorField, DecoratorConfig, Rgb},
};

/// joins multiple fragments
pub const SEPARATOR: &str = " | ";
///
pub const VERSION_PREFIX: &str = "v";
///
pub const BRANCH_PREFIX: &str = "\u{2387} "; // ⎇
///
pub const TAG_PREFIX: &str = "\u{2691} "; // ⚑

///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
	///
	Version,
	///
	Branch,
	///
	Tag,
}

impl FragmentKind {
	const fn color_field(self) -> ColorField {
		match self {
			Self::Version => ColorField::Version,
			Self::Branch => ColorField::Branch,
			Self::Tag => ColorField::Tag,
		}
	}

	const fn weight(self) -> Weight {
		match self {
			Self::Branch => Weight::Bold,
			Self::Version | Self::Tag => Weight::Plain,
		}
	}

	const fn prefix(self) -> &'static str {
		match self {
			Self::Version => VERSION_PREFIX,
			Self::Branch => BRANCH_PREFIX,
			Self::Tag => TAG_PREFIX,
		}
	}
}

///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
	///
	Plain,
	///
	Bold,
}

///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentStyle {
	///
	pub weight: Weight,
	///
	pub color: Rgb,
}

impl FragmentStyle {
	/// separators, parentheses and everything when colors are off
	pub const NEUTRAL: Self = Self {
		weight: Weight::Plain,
		color: Rgb::GRAY,
	};
}

/// a single labeled piece of annotation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
	///
	pub kind: FragmentKind,
	/// label including its prefix, like `v1.0.0`
	pub text: String,
	///
	pub style: FragmentStyle,
}

/// text run with a style, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
	///
	pub text: &'a str,
	///
	pub style: FragmentStyle,
}

/// all fragments of one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
	fragments: Vec<Fragment>,
}

impl Decoration {
	///
	pub fn fragments(&self) -> &[Fragment] {
		&self.fragments
	}

	///
	pub fn is_empty(&self) -> bool {
		self.fragments.is_empty()
	}

	/// styled runs including separators and parentheses
	pub fn segments(&self) -> Vec<Segment<'_>> {
		let neutral = |text: &'static str| Segment {
			text,
			style: FragmentStyle::NEUTRAL,
		};

		match self.fragments.as_slice() {
			[] => Vec::new(),
			[single] => vec![Segment {
				text: &single.text,
				style: single.style,
			}],
			fragments => {
				let mut segments: Vec<Segment<'_>> =
					Vec::with_capacity(fragments.len() * 2 + 1);
				segments.push(neutral("("));
				for (idx, fragment) in fragments.iter().enumerate() {
					if idx > 0 {
						segments.push(neutral(SEPARATOR));
					}
					segments.push(Segment {
						text: &fragment.text,
						style: fragment.style,
					});
				}
				segments.push(neutral(")"));
				segments
			}
		}
	}

	/// unstyled rendering, empty if there are no fragments
	pub fn to_plain_string(&self) -> String {
		self.segments().iter().map(|s| s.text).collect()
	}
}

/// builds the fragments for one subject.
///
/// `version` comes from the build metadata, `snapshot` from the info
/// cache. disabled fields and absent or empty values are skipped.
pub fn decorate(
	config: &DecoratorConfig,
	version: Option<&str>,
	snapshot: Option<&InfoSnapshot>,
) -> Decoration {
	if !config.enabled {
		return Decoration::default();
	}

	let candidates = [
		(
			FragmentKind::Version,
			config.show_version,
			non_empty(version),
		),
		(
			FragmentKind::Branch,
			config.show_branch,
			non_empty(snapshot.and_then(InfoSnapshot::branch)),
		),
		(
			FragmentKind::Tag,
			config.show_tags,
			non_empty(snapshot.and_then(InfoSnapshot::tag)),
		),
	];

	let fragments = candidates
		.into_iter()
		.filter(|(_, shown, _)| *shown)
		.filter_map(|(kind, _, value)| {
			value.map(|value| Fragment {
				kind,
				text: format!("{}{value}", kind.prefix()),
				style: style_for(config, kind),
			})
		})
		.collect();

	Decoration { fragments }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.trim().is_empty())
}

fn style_for(
	config: &DecoratorConfig,
	kind: FragmentKind,
) -> FragmentStyle {
	let color = if config.use_colors {
		config.color(kind.color_field())
	} else {
		Rgb::GRAY
	};

	FragmentStyle {
		weight: kind.weight(),
		color,
	}
}
