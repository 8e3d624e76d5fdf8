//! User-visible outcome messages.
//!
//! Three independent slots. A slot keeps its last value until the same kind of
//! outcome replaces it; switching modes only changes which slots are shown.

use crate::domain::InventoryError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    /// Last create or update confirmation.
    pub success: Option<String>,
    /// Last delete confirmation, as worded by the service.
    pub delete_success: Option<String>,
    /// Last failure. Cleared by the next applied success.
    pub error: Option<String>,
}

impl NotificationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&mut self, id: i64) {
        self.success = Some(format!("Product created successfully with ID: {id}"));
        self.error = None;
    }

    pub fn updated(&mut self) {
        self.success = Some("Product updated successfully.".to_string());
        self.error = None;
    }

    pub fn deleted(&mut self, detail: &str) {
        self.delete_success = Some(detail.to_string());
        self.error = None;
    }

    /// Records a success that has no message slot of its own.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Records a failure under a short description of what was attempted.
    pub fn failed(&mut self, label: &str, error: &InventoryError) {
        self.error = Some(match error {
            InventoryError::Validation(message) => message.clone(),
            other => format!("{label}: {other}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let mut notes = NotificationState::new();
        notes.created(7);
        assert_eq!(notes.success.as_deref(), Some("Product created successfully with ID: 7"));

        notes.updated();
        assert_eq!(notes.success.as_deref(), Some("Product updated successfully."));

        notes.deleted("Deleted");
        assert_eq!(notes.delete_success.as_deref(), Some("Deleted"));
    }

    #[test]
    fn failure_leaves_success_slots_alone() {
        let mut notes = NotificationState::new();
        notes.created(1);
        notes.deleted("gone");

        notes.failed("Error fetching product by ID", &InventoryError::Http { status: 404 });

        assert_eq!(notes.success.as_deref(), Some("Product created successfully with ID: 1"));
        assert_eq!(notes.delete_success.as_deref(), Some("gone"));
        assert_eq!(
            notes.error.as_deref(),
            Some("Error fetching product by ID: HTTP error! Status: 404")
        );
    }

    #[test]
    fn validation_message_is_shown_bare() {
        let mut notes = NotificationState::new();
        notes.failed("Error creating product", &InventoryError::incomplete_draft());
        assert_eq!(notes.error.as_deref(), Some("Please fill out all fields correctly."));
    }

    #[test]
    fn success_clears_error() {
        let mut notes = NotificationState::new();
        notes.failed("x", &InventoryError::Http { status: 500 });
        notes.updated();
        assert!(notes.error.is_none());
    }
}
