//! Form input renderer.
//!
//! Each input takes one line: a focus marker, a fixed-width label, and the
//! current text (or a dimmed placeholder). The focused input ends with a
//! block cursor.

use crate::ui::helpers::{display_width, pad_right, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormRow;

const LABEL_WIDTH: usize = 14;
const MARGIN: usize = 2;

/// Renders all inputs starting at `row`. Returns the next available row.
pub fn render_form(row: usize, inputs: &[FormRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for input in inputs {
        current_row = render_input(current_row, input, theme, cols);
    }
    current_row
}

fn render_input(row: usize, input: &FormRow, theme: &Theme, cols: usize) -> usize {
    let value_width = cols.saturating_sub(MARGIN + LABEL_WIDTH + 4);

    position_cursor(row, 1);
    print!("{}", " ".repeat(MARGIN));

    if input.is_focused {
        print!("{}", Theme::fg(&theme.colors.input_focus_border));
        print!("▸ ");
        print!("{}", Theme::bold());
    } else {
        print!("{}", Theme::fg(&theme.colors.input_border));
        print!("  ");
    }
    print!("{}", pad_right(input.label, LABEL_WIDTH));
    print!("{}", Theme::reset());

    let text = truncate(&input.text, value_width.saturating_sub(1));
    if input.is_placeholder {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let mut written = MARGIN + 2 + LABEL_WIDTH + display_width(&text);
    // The cursor sits before the placeholder, after real text.
    if input.is_focused && input.is_placeholder {
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.input_focus_border));
        print!("█");
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{text}");
        written += 1;
    } else if input.is_focused {
        print!("{text}");
        print!("{}", Theme::fg(&theme.colors.input_focus_border));
        print!("█");
        written += 1;
    } else {
        print!("{text}");
    }

    print!("{}", " ".repeat(cols.saturating_sub(written)));
    print!("{}", Theme::reset());
    row + 1
}
