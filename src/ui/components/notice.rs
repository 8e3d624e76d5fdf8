//! Success and error message renderer.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Notice, NoticeKind};

const MARGIN: usize = 2;

/// Renders one line per notice. Returns the next available row.
pub fn render_notices(row: usize, notices: &[Notice], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for notice in notices {
        let (color, marker) = match notice.kind {
            NoticeKind::Success => (&theme.colors.success_fg, "✔"),
            NoticeKind::Error => (&theme.colors.error_fg, "✘"),
        };
        let text = truncate(&notice.text, cols.saturating_sub(MARGIN + 2));

        position_cursor(current_row, 1);
        print!("{}", " ".repeat(MARGIN));
        print!("{}", Theme::fg(color));
        print!("{marker} {text}");
        print!("{}", " ".repeat(cols.saturating_sub(MARGIN + 2 + display_width(&text))));
        print!("{}", Theme::reset());

        current_row += 1;
    }

    current_row
}
