pub mod style;

use ratatui::layout::{Constraint, Layout, Rect};

/// splits `r` into the tree area and a one line status bar below it
pub fn tree_and_status(r: Rect) -> (Rect, Rect) {
	let chunks =
		Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
			.split(r);

	(chunks[0], chunks[1])
}

/// first visible row so that `selection` stays inside `height` rows
pub const fn scroll_offset(
	current: usize,
	selection: usize,
	height: usize,
) -> usize {
	if height == 0 {
		0
	} else if selection < current {
		selection
	} else if selection >= current + height {
		selection + 1 - height
	} else {
		current
	}
}
