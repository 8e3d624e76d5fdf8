//! Form input state layered over the draft record.
//!
//! Draft text fields are edited in place on the [`RecordBuffer`]. The form
//! itself only owns what the draft cannot hold: the two id inputs, the raw
//! price text (so `"12."` survives while the operator is still typing), and
//! which field has focus.

use crate::app::buffer::RecordBuffer;
use crate::app::modes::Mode;
use crate::domain::error::{InventoryError, Result};
use crate::domain::{format_price, DraftField, ProductDraft};

/// One editable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Product id for search and update.
    ProductId,
    /// Product id to delete.
    DeleteId,
    Draft(DraftField),
}

impl FormField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProductId | Self::DeleteId => "Product ID",
            Self::Draft(field) => field.label(),
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::ProductId => "Enter Product ID",
            Self::DeleteId => "Enter Product ID to Delete",
            Self::Draft(field) => field.placeholder(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Shared by the search and update modes.
    pub product_id: String,
    pub delete_id: String,
    pub price_text: String,
    focus: usize,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused field in `mode`, or `None` if the mode has no fields.
    #[must_use]
    pub fn focused(&self, mode: Mode) -> Option<FormField> {
        mode.fields().get(self.focus).copied()
    }

    #[must_use]
    pub const fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    /// Moves focus down, wrapping. Returns whether focus moved.
    pub fn focus_next(&mut self, mode: Mode) -> bool {
        let count = mode.fields().len();
        if count < 2 {
            return false;
        }
        self.focus = (self.focus + 1) % count;
        true
    }

    /// Moves focus up, wrapping. Returns whether focus moved.
    pub fn focus_previous(&mut self, mode: Mode) -> bool {
        let count = mode.fields().len();
        if count < 2 {
            return false;
        }
        self.focus = (self.focus + count - 1) % count;
        true
    }

    /// Current text of `field`, as shown in its input.
    #[must_use]
    pub fn value<'a>(&'a self, field: FormField, draft: &'a ProductDraft) -> &'a str {
        match field {
            FormField::ProductId => &self.product_id,
            FormField::DeleteId => &self.delete_id,
            FormField::Draft(DraftField::Price) => &self.price_text,
            FormField::Draft(text) => draft.text(text).unwrap_or_default(),
        }
    }

    /// Types `c` into the focused field. Returns whether anything changed.
    pub fn insert_char(&mut self, mode: Mode, c: char, buffer: &mut RecordBuffer) -> bool {
        self.edit(mode, buffer, |text| {
            text.push(c);
            true
        })
    }

    /// Deletes the last character of the focused field. Returns whether
    /// anything changed.
    pub fn backspace(&mut self, mode: Mode, buffer: &mut RecordBuffer) -> bool {
        self.edit(mode, buffer, |text| text.pop().is_some())
    }

    fn edit(&mut self, mode: Mode, buffer: &mut RecordBuffer, apply: impl FnOnce(&mut String) -> bool) -> bool {
        let Some(field) = self.focused(mode) else {
            return false;
        };

        match field {
            FormField::ProductId => apply(&mut self.product_id),
            FormField::DeleteId => apply(&mut self.delete_id),
            FormField::Draft(DraftField::Price) => {
                let changed = apply(&mut self.price_text);
                if changed {
                    buffer.set_draft_field(DraftField::Price, &self.price_text);
                }
                changed
            }
            FormField::Draft(text_field) => {
                let mut text = buffer.draft.text(text_field).unwrap_or_default().to_string();
                let changed = apply(&mut text);
                if changed {
                    buffer.set_draft_field(text_field, &text);
                }
                changed
            }
        }
    }

    /// Re-seeds the price input after the draft was replaced.
    pub fn sync_price(&mut self, draft: &ProductDraft) {
        self.price_text = format_price(draft.price);
    }

    /// Parses the search/update id input.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] if the input is not an integer.
    pub fn parse_product_id(&self) -> Result<i64> {
        parse_id(&self.product_id)
    }

    /// Parses the delete id input.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] if the input is not an integer.
    pub fn parse_delete_id(&self) -> Result<i64> {
        parse_id(&self.delete_id)
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| InventoryError::Validation("Please enter a valid product ID.".to_string()))
}
