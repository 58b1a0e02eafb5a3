use crate::{decorator::Decorator, tree::ProjectTree, ui::style};
use anyhow::Result;
use asyncinfo::{DecoratorConfig, InfoNotification};
use crossbeam_channel::Receiver;
use crossterm::style::{Attribute, Stylize};
use std::{
	io::Write,
	time::{Duration, Instant},
};

const INDENT: &str = "  ";

/// requests git info for the whole tree and waits until every fetch
/// finished or `timeout` passed
pub fn warm_up(
	tree: &ProjectTree,
	decorator: &Decorator,
	config: &DecoratorConfig,
	rx: &Receiver<InfoNotification>,
	timeout: Duration,
) {
	decorator.request_all(tree, config);

	let until = Instant::now() + timeout;

	while decorator.coordinator().is_pending() {
		let left = until.saturating_duration_since(Instant::now());
		if left.is_zero() {
			log::warn!(
				"print: {} fetches still pending",
				decorator.coordinator().pending()
			);
			break;
		}

		// the channel only wakes us up, the cache holds the data
		let _ = rx.recv_timeout(left);
	}
}

/// writes one line per node: indentation, name and decoration
pub fn print_tree<W: Write>(
	out: &mut W,
	tree: &ProjectTree,
	decorator: &Decorator,
	config: &DecoratorConfig,
	color: bool,
) -> Result<()> {
	for node in tree.nodes() {
		write!(out, "{}{}", INDENT.repeat(node.depth), node.name)?;

		let decoration = decorator.decorate(tree, node, config);
		if !decoration.is_empty() {
			write!(out, " ")?;
		}

		for segment in decoration.segments() {
			if color {
				let fg = style::crossterm_color(segment.style.color);
				let mut styled = segment.text.with(fg);
				if style::is_bold(segment.style) {
					styled = styled.attribute(Attribute::Bold);
				}
				write!(out, "{styled}")?;
			} else {
				write!(out, "{}", segment.text)?;
			}
		}

		writeln!(out)?;
	}

	Ok(())
}
