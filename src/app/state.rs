//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the view. It composes the
//! mode controller, the shared record buffer, the notifications, the form
//! inputs and the request tracker. Rendering is a pure projection of it: see
//! [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use stockroom::api::ApiClient;
//! use stockroom::app::AppState;
//! use stockroom::ui::theme::Theme;
//!
//! let state = AppState::new(ApiClient::new("http://localhost:3000"), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.tabs.len(), 5);
//! ```

use crate::api::{ApiClient, RequestTracker};
use crate::app::buffer::RecordBuffer;
use crate::app::form::{FormField, FormState};
use crate::app::modes::{Mode, ModeController};
use crate::app::notifications::NotificationState;
use crate::domain::{format_price, Product};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, ColumnWidths, EmptyState, FooterInfo, FormRow, HeaderInfo, Notice, NoticeKind, ProductCard, ProductRow, TabItem,
    TableView, UIViewModel,
};

/// Rows taken by everything except the form, notices and body: blank line,
/// header, tabs, border, blank line under the form, footer border, footer.
const CHROME_ROWS: usize = 7;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub modes: ModeController,
    pub buffer: RecordBuffer,
    pub notifications: NotificationState,
    pub form: FormState,
    pub requests: RequestTracker,
    pub client: ApiClient,
    pub theme: Theme,
}

impl AppState {
    /// Creates the state every plugin load starts from: Search mode, an
    /// empty draft and no results.
    #[must_use]
    pub fn new(client: ApiClient, theme: Theme) -> Self {
        Self {
            modes: ModeController::new(),
            buffer: RecordBuffer::new(),
            notifications: NotificationState::new(),
            form: FormState::new(),
            requests: RequestTracker::new(),
            client,
            theme,
        }
    }

    /// Projects the state into a renderable view model for a pane of
    /// `rows` x `cols` cells.
    ///
    /// Only the result table depends on the pane size: it shows as many rows
    /// as fit and reports how many were left out.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let mode = self.modes.current();
        let form = self.compute_form(mode);
        let notices = self.compute_notices(mode);

        let used = CHROME_ROWS + form.len() + notices.len() + usize::from(!notices.is_empty());
        let body = self.compute_body(mode, rows.saturating_sub(used), cols);

        UIViewModel {
            header: self.compute_header(mode),
            tabs: Self::compute_tabs(mode),
            form,
            notices,
            body,
            footer: self.compute_footer(mode),
        }
    }

    fn compute_header(&self, mode: Mode) -> HeaderInfo {
        let in_flight = self.requests.in_flight();
        let status = match in_flight {
            0 => None,
            1 => Some("1 request pending".to_string()),
            n => Some(format!("{n} requests pending")),
        };

        HeaderInfo {
            title: format!(" Stockroom: {} ", mode.title()),
            status,
        }
    }

    fn compute_tabs(active: Mode) -> Vec<TabItem> {
        Mode::ALL
            .iter()
            .map(|&mode| TabItem {
                title: mode.title(),
                key: format!("F{}", mode.index() + 1),
                is_active: mode == active,
            })
            .collect()
    }

    fn compute_form(&self, mode: Mode) -> Vec<FormRow> {
        let focused = self.form.focused(mode);

        mode.fields()
            .iter()
            .map(|&field| {
                let value = self.form.value(field, &self.buffer.draft);
                let is_placeholder = value.is_empty();
                FormRow {
                    label: field.label(),
                    text: if is_placeholder {
                        field.placeholder().to_string()
                    } else {
                        value.to_string()
                    },
                    is_placeholder,
                    is_focused: focused == Some(field),
                }
            })
            .collect()
    }

    fn compute_notices(&self, mode: Mode) -> Vec<Notice> {
        let notes = &self.notifications;
        let confirmation = match mode {
            Mode::Create | Mode::Update => notes.success.as_ref(),
            Mode::Delete => notes.delete_success.as_ref(),
            Mode::Search | Mode::CreateRandom => None,
        };

        let success = confirmation.map(|text| Notice {
            kind: NoticeKind::Success,
            text: text.clone(),
        });
        let error = notes.error.as_ref().map(|text| Notice {
            kind: NoticeKind::Error,
            text: text.clone(),
        });

        success.into_iter().chain(error).collect()
    }

    fn compute_body(&self, mode: Mode, available_rows: usize, cols: usize) -> Body {
        match mode {
            Mode::Search if self.buffer.results.is_empty() => Body::Empty(EmptyState {
                message: "No products to show".to_string(),
                subtitle: "Enter a product ID and press Enter, or press Ctrl+l to list all".to_string(),
            }),
            Mode::Search => {
                // One row for the column headers, one for the overflow line.
                let mut capacity = available_rows.saturating_sub(1);
                if capacity < self.buffer.results.len() {
                    capacity = capacity.saturating_sub(1);
                }
                let shown = capacity.min(self.buffer.results.len());

                Body::Table(TableView {
                    columns: ColumnWidths::fit(cols),
                    rows: self.buffer.results[..shown].iter().map(Self::compute_row).collect(),
                    hidden: self.buffer.results.len() - shown,
                })
            }
            Mode::CreateRandom => self.buffer.random_product.as_ref().map_or_else(
                || {
                    Body::Empty(EmptyState {
                        message: "No random product yet".to_string(),
                        subtitle: "Press Enter to have the service generate one".to_string(),
                    })
                },
                |product| Body::Card(Self::compute_card(product)),
            ),
            Mode::Create | Mode::Update | Mode::Delete => Body::Nothing,
        }
    }

    fn compute_row(product: &Product) -> ProductRow {
        ProductRow {
            id: product.id.to_string(),
            name: product.name.clone(),
            code: product.code.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: format!("{:.2}", product.price),
            created_at: product.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    fn compute_card(product: &Product) -> ProductCard {
        ProductCard {
            title: format!("Generated product #{}", product.id),
            fields: vec![
                ("Name", product.name.clone()),
                ("Code", product.code.clone()),
                ("Description", product.description.clone()),
                ("Category", product.category.clone()),
                ("Price", format_price(product.price)),
                ("Created", product.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            ],
        }
    }

    fn compute_footer(&self, mode: Mode) -> FooterInfo {
        let action = match mode {
            Mode::Search => "Enter: fetch  Ctrl+l: list all",
            Mode::Create => "Enter: create  ↑/↓: field",
            Mode::CreateRandom => "Enter: generate",
            Mode::Update if self.form.focused(mode) == Some(FormField::ProductId) => "Enter: load  ↑/↓: field",
            Mode::Update => "Enter: save  ↑/↓: field",
            Mode::Delete => "Enter: delete",
        };

        FooterInfo {
            keybindings: format!("{action}  Tab/F1-F5: mode  Esc: close"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn state() -> AppState {
        AppState::new(ApiClient::new("http://inventory.test"), Theme::default())
    }

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("product-{id}"),
            code: format!("P{id}"),
            description: "desc".into(),
            category: "tools".into(),
            price: 10.0,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn tabs_mark_active_mode() {
        let mut state = state();
        state.modes.select(Mode::Update);
        let vm = state.compute_viewmodel(24, 80);

        let active: Vec<_> = vm.tabs.iter().filter(|tab| tab.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Update");
        assert_eq!(active[0].key, "F4");
    }

    #[test]
    fn empty_inputs_show_placeholders() {
        let vm = state().compute_viewmodel(24, 80);
        assert_eq!(vm.form.len(), 1);
        assert!(vm.form[0].is_placeholder);
        assert_eq!(vm.form[0].text, "Enter Product ID");
        assert!(vm.form[0].is_focused);
    }

    #[test]
    fn search_without_results_shows_empty_state() {
        let vm = state().compute_viewmodel(24, 80);
        assert!(matches!(vm.body, Body::Empty(_)));
    }

    #[test]
    fn table_only_in_search() {
        let mut state = state();
        state.buffer.set_results(vec![product(1), product(2)]);

        match state.compute_viewmodel(24, 80).body {
            Body::Table(table) => {
                assert_eq!(table.rows.len(), 2);
                assert_eq!(table.hidden, 0);
                assert_eq!(table.rows[0].price, "10.00");
                assert_eq!(table.rows[0].created_at, "2024-01-01 09:30");
                assert_eq!(table.rows[0].description, "desc");
                assert_eq!(table.columns, ColumnWidths::fit(80));
            }
            other => panic!("expected table, got {other:?}"),
        }

        state.modes.select(Mode::Create);
        assert_eq!(state.compute_viewmodel(24, 80).body, Body::Nothing);
    }

    #[test]
    fn table_reports_rows_that_do_not_fit() {
        let mut state = state();
        state.buffer.set_results((1..=50).map(product).collect());

        match state.compute_viewmodel(20, 80).body {
            Body::Table(table) => {
                assert!(table.rows.len() < 50);
                assert_eq!(table.rows.len() + table.hidden, 50);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn notices_follow_mode_visibility() {
        let mut state = state();
        state.notifications.created(7);
        state.notifications.deleted("Deleted");

        let texts = |state: &AppState| {
            state
                .compute_viewmodel(24, 80)
                .notices
                .into_iter()
                .map(|n| n.text)
                .collect::<Vec<_>>()
        };

        assert!(texts(&state).is_empty());

        state.modes.select(Mode::Create);
        assert_eq!(texts(&state), ["Product created successfully with ID: 7"]);

        state.modes.select(Mode::Delete);
        assert_eq!(texts(&state), ["Deleted"]);

        state.notifications.error = Some("Error deleting product: HTTP error! Status: 500".into());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.notices.len(), 2);
        assert_eq!(vm.notices[1].kind, NoticeKind::Error);
    }

    #[test]
    fn random_mode_shows_card_once_generated() {
        let mut state = state();
        state.modes.select(Mode::CreateRandom);
        assert!(matches!(state.compute_viewmodel(24, 80).body, Body::Empty(_)));

        state.buffer.random_product = Some(product(11));
        match state.compute_viewmodel(24, 80).body {
            Body::Card(card) => {
                assert_eq!(card.title, "Generated product #11");
                assert!(card.fields.contains(&("Price", "10".to_string())));
            }
            other => panic!("expected card, got {other:?}"),
        }
    }

    #[test]
    fn header_reports_pending_requests() {
        let mut state = state();
        assert_eq!(state.compute_viewmodel(24, 80).header.status, None);

        state.requests.issue(crate::api::RequestFamily::Results);
        state.requests.issue(crate::api::RequestFamily::Delete);
        assert_eq!(
            state.compute_viewmodel(24, 80).header.status.as_deref(),
            Some("2 requests pending")
        );
    }

    #[test]
    fn update_footer_depends_on_focus() {
        let mut state = state();
        state.modes.select(Mode::Update);
        assert!(state.compute_viewmodel(24, 80).footer.keybindings.starts_with("Enter: load"));

        state.form.focus_next(Mode::Update);
        assert!(state.compute_viewmodel(24, 80).footer.keybindings.starts_with("Enter: save"));
    }
}
