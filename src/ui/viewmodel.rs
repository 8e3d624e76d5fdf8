//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel()` and
//! consumed by the renderer. They carry display-ready strings and flags only;
//! which notices and which body a mode shows has already been decided.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// One entry per mode, in tab order.
    pub tabs: Vec<TabItem>,

    /// Inputs of the active mode, top to bottom. Empty for modes without input.
    pub form: Vec<FormRow>,

    /// Messages visible in the active mode.
    pub notices: Vec<Notice>,

    /// Main content below the form.
    pub body: Body,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, centered.
    pub title: String,

    /// Right-aligned status, e.g. the number of requests still in flight.
    pub status: Option<String>,
}

/// A mode tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub title: &'static str,
    /// Function key that selects the tab directly.
    pub key: String,
    pub is_active: bool,
}

/// A single labelled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub label: &'static str,
    /// Current text, or the placeholder when the input is empty.
    pub text: String,
    pub is_placeholder: bool,
    pub is_focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// What fills the space between the notices and the footer.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Nothing,
    Table(TableView),
    Card(ProductCard),
    Empty(EmptyState),
}

/// The visible slice of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: ColumnWidths,
    pub rows: Vec<ProductRow>,
    /// Records that did not fit on screen.
    pub hidden: usize,
}

pub const ID_WIDTH: usize = 6;
pub const CODE_WIDTH: usize = 12;
pub const CATEGORY_WIDTH: usize = 14;
pub const PRICE_WIDTH: usize = 10;
pub const CREATED_WIDTH: usize = 16;

const FIXED_WIDTH: usize = ID_WIDTH + CODE_WIDTH + CATEGORY_WIDTH + PRICE_WIDTH + CREATED_WIDTH;
const MIN_NAME_WIDTH: usize = 8;
const MIN_DESCRIPTION_WIDTH: usize = 12;

/// Widths of the two flexible table columns.
///
/// Name and description share what the fixed columns leave, two to three.
/// The description column is dropped when its share gets too narrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub name: usize,
    pub description: Option<usize>,
}

impl ColumnWidths {
    /// Lays the columns out for a pane `cols` cells wide.
    ///
    /// ```rust
    /// use stockroom::ui::viewmodel::ColumnWidths;
    ///
    /// assert_eq!(ColumnWidths::fit(120), ColumnWidths { name: 22, description: Some(33) });
    /// assert_eq!(ColumnWidths::fit(80), ColumnWidths { name: 16, description: None });
    /// ```
    #[must_use]
    pub fn fit(cols: usize) -> Self {
        // A leading space plus one between each of the seven columns.
        let flexible = cols.saturating_sub(FIXED_WIDTH + 7);
        let name = (flexible * 2 / 5).max(MIN_NAME_WIDTH);
        let description = flexible.saturating_sub(name);

        if description >= MIN_DESCRIPTION_WIDTH {
            Self {
                name,
                description: Some(description),
            }
        } else {
            Self {
                name: cols.saturating_sub(FIXED_WIDTH + 6).max(MIN_NAME_WIDTH),
                description: None,
            }
        }
    }
}

/// One product, preformatted for the table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub created_at: String,
}

/// Label/value pairs describing one product in full.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No products to show").
    pub message: String,

    /// Secondary hint on how to fill the view.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the active mode.
    pub keybindings: String,
}
