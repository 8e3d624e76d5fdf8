//! Composable UI component renderers.
//!
//! Each component prints one part of the pane starting at a given row and
//! returns the next free row, so the layout is a simple top-down fold.
//!
//! # Components
//!
//! - [`header`]: Title bar and mode tabs
//! - [`form`]: Labelled inputs of the active mode
//! - [`notice`]: Success and error lines
//! - [`table`]: Result list
//! - [`empty`]: Empty state message and product card
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Tabs]
//! [Border]
//! [Form inputs]
//! [blank line]
//! [Notices, then a blank line if any]
//! [Body: table, card or empty state]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod form;
mod header;
mod notice;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use empty::{render_card, render_empty_state};
use footer::render_footer;
use form::render_form;
use header::{render_header, render_tabs};
use notice::render_notices;
use table::render_table;

/// Renders a horizontal border line. Returns the next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole pane.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_tabs(current_row, &vm.tabs, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_form(current_row, &vm.form, theme, cols) + 1;

    if !vm.notices.is_empty() {
        current_row = render_notices(current_row, &vm.notices, theme, cols) + 1;
    }

    match &vm.body {
        Body::Table(table) => {
            render_table(current_row, table, theme, cols);
        }
        Body::Card(card) => {
            render_card(current_row, card, theme, cols);
        }
        Body::Empty(empty) => {
            render_empty_state(current_row, empty, theme, cols);
        }
        Body::Nothing => {}
    }

    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
