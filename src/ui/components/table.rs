//! Result list renderer.
//!
//! Columns: ID, NAME, CODE, DESCRIPTION, CATEGORY, PRICE, CREATED. Name and
//! description flex with the pane width (see [`ColumnWidths`]); every line is
//! clipped to the pane.

use crate::ui::helpers::{display_width, pad_left, pad_right, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnWidths, ProductRow, TableView, CATEGORY_WIDTH, CODE_WIDTH, CREATED_WIDTH, ID_WIDTH, PRICE_WIDTH,
};

/// Renders the column headers, the rows, and an overflow line if some
/// records did not fit. Returns the next available row.
pub fn render_table(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_table_headers(row, table.columns, theme, cols);

    for item in &table.rows {
        current_row = render_table_row(current_row, item, table.columns, theme, cols);
    }

    if table.hidden > 0 {
        position_cursor(current_row, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate(&format!(" ... {} more", table.hidden), cols));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}

fn render_table_headers(row: usize, columns: ColumnWidths, theme: &Theme, cols: usize) -> usize {
    let headers = ProductRow {
        id: "ID".into(),
        name: "NAME".into(),
        code: "CODE".into(),
        description: "DESCRIPTION".into(),
        category: "CATEGORY".into(),
        price: "PRICE".into(),
        created_at: "CREATED".into(),
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", format_line(&headers, columns, cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_table_row(row: usize, item: &ProductRow, columns: ColumnWidths, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", format_line(item, columns, cols));
    print!("{}", Theme::reset());
    row + 1
}

fn format_line(item: &ProductRow, columns: ColumnWidths, cols: usize) -> String {
    let mut cells = vec![
        pad_left(&item.id, ID_WIDTH),
        pad_right(&item.name, columns.name),
        pad_right(&item.code, CODE_WIDTH),
    ];
    if let Some(width) = columns.description {
        cells.push(pad_right(&item.description, width));
    }
    cells.push(pad_right(&item.category, CATEGORY_WIDTH));
    cells.push(pad_left(&item.price, PRICE_WIDTH));
    cells.push(pad_right(&item.created_at, CREATED_WIDTH));

    let line = truncate(&format!(" {}", cells.join(" ")), cols);
    let fill = cols.saturating_sub(display_width(&line));
    format!("{line}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProductRow {
        ProductRow {
            id: "7".into(),
            name: "Bat".into(),
            code: "B1".into(),
            description: "Maple, 33 inch".into(),
            category: "sports".into(),
            price: "10.00".into(),
            created_at: "2024-01-01 00:00".into(),
        }
    }

    fn line(cols: usize) -> String {
        format_line(&row(), ColumnWidths::fit(cols), cols)
    }

    #[test]
    fn line_fills_wide_pane_exactly() {
        let line = line(120);
        assert_eq!(display_width(&line), 120);
        assert!(line.starts_with("      7 Bat"));
        assert!(line.contains("Maple, 33 inch"));
    }

    #[test]
    fn narrow_panes_never_overflow() {
        for cols in [20, 40, 60, 72, 80, 95] {
            assert_eq!(display_width(&line(cols)), cols, "cols={cols}");
        }
    }

    #[test]
    fn description_is_dropped_when_cramped() {
        assert!(!line(80).contains("Maple"));
        assert!(line(80).contains("sports"));
    }

    #[test]
    fn columns_align_between_header_and_rows() {
        let columns = ColumnWidths::fit(100);
        let a = format_line(&row(), columns, 100);
        let mut other = row();
        other.id = "12345".into();
        other.name = "A much longer product name than fits".into();
        let b = format_line(&other, columns, 100);
        assert_eq!(a.find("B1"), b.find("B1"));
    }
}
