//! The shared draft record and the result list.
//!
//! One [`RecordBuffer`] lives for the whole plugin session. Its draft is
//! reused by the search, create and update flows and survives mode switches.
//! The result list is replaced wholesale by list and search outcomes and is
//! only merged into by create (append) and delete (remove).

use crate::domain::{DraftField, Product, ProductDraft};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBuffer {
    pub draft: ProductDraft,
    pub results: Vec<Product>,
    /// Last product generated by create-random.
    pub random_product: Option<Product>,
}

impl RecordBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates exactly one draft field from raw input text.
    ///
    /// Text fields are stored verbatim. The price is parsed from the trimmed
    /// text; anything that is not a number stores `NaN`, which fails
    /// validation later.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stockroom::app::buffer::RecordBuffer;
    /// use stockroom::domain::DraftField;
    ///
    /// let mut buffer = RecordBuffer::new();
    /// buffer.set_draft_field(DraftField::Price, " 12.5 ");
    /// assert_eq!(buffer.draft.price, 12.5);
    ///
    /// buffer.set_draft_field(DraftField::Price, "abc");
    /// assert!(buffer.draft.price.is_nan());
    /// ```
    pub fn set_draft_field(&mut self, field: DraftField, raw: &str) {
        let draft = &mut self.draft;
        match field {
            DraftField::Name => raw.clone_into(&mut draft.name),
            DraftField::Code => raw.clone_into(&mut draft.code),
            DraftField::Description => raw.clone_into(&mut draft.description),
            DraftField::Category => raw.clone_into(&mut draft.category),
            DraftField::Price => draft.price = raw.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Overwrites every draft field from a persisted record.
    pub fn load_draft_from(&mut self, product: &Product) {
        self.draft = product.to_draft();
    }

    pub fn set_results(&mut self, products: Vec<Product>) {
        self.results = products;
    }

    pub fn append_result(&mut self, product: Product) {
        self.results.push(product);
    }

    /// Drops every record with a matching id. Unknown ids are a no-op.
    pub fn remove_result(&mut self, id: i64) {
        self.results.retain(|product| product.id != id);
    }
}
