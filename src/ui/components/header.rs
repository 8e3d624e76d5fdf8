//! Header and mode tab renderers.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, TabItem};

/// Renders the title bar: centered title, optional right-aligned status.
///
/// Returns the next available row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = display_width(&title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{title}");

    let remaining = cols.saturating_sub(padding + title_len);
    match &header.status {
        Some(status) if display_width(status) + 1 < remaining => {
            let status_len = display_width(status);
            print!("{}", " ".repeat(remaining - status_len - 1));
            print!("{}", Theme::fg(&theme.colors.pending_fg));
            print!("{status} ");
        }
        _ => print!("{}", " ".repeat(remaining)),
    }

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the mode tabs on one line, the active tab highlighted.
///
/// ```text
///  F1 Search   F2 Create   F3 Create Random   F4 Update   F5 Delete
/// ```
pub fn render_tabs(row: usize, tabs: &[TabItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 0;
    for tab in tabs {
        let label = format!(" {} {} ", tab.key, tab.title);
        let len = display_width(&label) + 1;
        if used + len > cols {
            break;
        }

        print!(" ");
        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{}", Theme::reset());
        used += len;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
