//! Empty state and product card renderers.

use crate::ui::helpers::{pad_right, position_cursor, print_centered, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, ProductCard};

const CARD_LABEL_WIDTH: usize = 13;
const CARD_MARGIN: usize = 4;

/// Renders a centered two-line message one row below `row`.
///
/// ```text
///
///              No products to show
///   Enter a product ID and press Enter, or ...
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(&empty.message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
    print!("{}", Theme::reset());

    row + 3
}

/// Renders a product as a titled list of label/value lines.
pub fn render_card(row: usize, card: &ProductCard, theme: &Theme, cols: usize) -> usize {
    let value_width = cols.saturating_sub(CARD_MARGIN + CARD_LABEL_WIDTH);

    position_cursor(row, 1);
    print!("{}", " ".repeat(CARD_MARGIN));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.success_fg));
    print!("{}", truncate(&card.title, cols.saturating_sub(CARD_MARGIN)));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for (label, value) in &card.fields {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(CARD_MARGIN));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", pad_right(label, CARD_LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(value, value_width));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
