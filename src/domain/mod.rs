//! Domain layer for the Stockroom plugin.
//!
//! Core types independent of Zellij APIs: the product record, the editable
//! draft, and the crate-wide error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Product record, draft payload and validation
//!
//! # Examples
//!
//! ```
//! use stockroom::domain::{ProductDraft, Result};
//!
//! fn check(draft: &ProductDraft) -> Result<()> {
//!     draft.validate()
//! }
//!
//! assert!(check(&ProductDraft::default()).is_err());
//! ```

pub mod error;
pub mod product;

pub use error::{InventoryError, Result};
pub use product::{format_price, DraftField, Product, ProductDraft};
