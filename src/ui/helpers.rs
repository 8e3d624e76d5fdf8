//! Shared rendering utilities.
//!
//! Width calculations count `char`s, not bytes, so product names with
//! non-ASCII text line up in the table.

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies, assuming one cell per `char`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max_width` chars, ending in `...` when cut.
///
/// # Example
///
/// ```rust
/// use stockroom::ui::helpers::truncate;
///
/// assert_eq!(truncate("Baseball bat", 8), "Baseb...");
/// assert_eq!(truncate("Bat", 8), "Bat");
/// ```
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }

    let kept: String = text.chars().take(max_width - 3).collect();
    format!("{kept}...")
}

/// Left-aligns `text` in a column of `width` cells, truncating if needed.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let fitted = truncate(text, width);
    let fill = width.saturating_sub(display_width(&fitted));
    format!("{fitted}{}", " ".repeat(fill))
}

/// Right-aligns `text` in a column of `width` cells, truncating if needed.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let fitted = truncate(text, width);
    let fill = width.saturating_sub(display_width(&fitted));
    format!("{}{fitted}", " ".repeat(fill))
}

/// Prints `text` centered in a line of `cols` cells, filling both sides.
pub fn print_centered(text: &str, cols: usize) {
    let fitted = truncate(text, cols);
    let len = display_width(&fitted);
    let left = cols.saturating_sub(len) / 2;
    print!("{}{fitted}{}", " ".repeat(left), " ".repeat(cols.saturating_sub(left + len)));
}
