//! Incoming results and their decoding into typed outcomes.
//!
//! Every result is judged the same way: a non-success status, or a body that
//! does not decode into the shape the operation expects, is a failure. The
//! caller never needs to tell 4xx from 5xx.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::operation::Operation;
use super::request::RequestContext;
use crate::domain::error::{InventoryError, Result};
use crate::domain::Product;

/// A raw result delivered by the host for an earlier [`super::ApiRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// The request context map, echoed back unchanged.
    pub context: BTreeMap<String, String>,
}

/// The typed result of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Fetched(Product),
    Listed(Vec<Product>),
    Created(Product),
    Updated,
    Deleted {
        id: i64,
        detail: String,
    },
    RandomCreated(Product),
}

#[derive(Deserialize)]
struct DeleteConfirmation {
    detail: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Parses the echoed request context.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Context`] if the map is incomplete.
    pub fn request_context(&self) -> Result<RequestContext> {
        RequestContext::from_map(&self.context)
    }

    /// Decodes the body according to the operation that produced it.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::Http`] for any non-2xx status
    /// - [`InventoryError::Decode`] if the body has the wrong shape
    /// - [`InventoryError::Context`] if a delete result lacks its target id
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use stockroom::api::{ApiResponse, Operation, RequestContext, RequestFamily};
    /// use stockroom::InventoryError;
    ///
    /// let context = RequestContext {
    ///     operation: Operation::FetchById,
    ///     family: RequestFamily::Results,
    ///     seq: 1,
    ///     product_id: Some(9),
    ///     trace: None,
    /// };
    /// let response = ApiResponse { status: 404, body: b"{}".to_vec(), context: context.to_map() };
    ///
    /// assert!(matches!(response.decode(&context), Err(InventoryError::Http { status: 404 })));
    /// ```
    pub fn decode(&self, context: &RequestContext) -> Result<ApiOutcome> {
        if !self.is_success() {
            return Err(InventoryError::Http { status: self.status });
        }

        Ok(match context.operation {
            Operation::FetchById => ApiOutcome::Fetched(self.json()?),
            Operation::ListAll => ApiOutcome::Listed(self.json()?),
            Operation::Create => ApiOutcome::Created(self.json()?),
            Operation::Update => ApiOutcome::Updated,
            Operation::Delete => {
                let id = context
                    .product_id
                    .ok_or_else(|| InventoryError::Context("delete result without product_id".to_string()))?;
                let confirmation: DeleteConfirmation = self.json()?;
                ApiOutcome::Deleted {
                    id,
                    detail: confirmation.detail,
                }
            }
            Operation::CreateRandom => ApiOutcome::RandomCreated(self.json()?),
        })
    }

    fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(InventoryError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operation::RequestFamily;

    const BAT: &str = r#"{"id":7,"name":"Bat","code":"B1","description":"d","category":"c","price":10,"created_at":"2024-01-01T00:00:00Z"}"#;

    fn context(operation: Operation, product_id: Option<i64>) -> RequestContext {
        RequestContext {
            operation,
            family: RequestFamily::Results,
            seq: 1,
            product_id,
            trace: None,
        }
    }

    fn response(status: u16, body: &str, ctx: &RequestContext) -> ApiResponse {
        ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: ctx.to_map(),
        }
    }

    #[test]
    fn fetch_decodes_one_product() {
        let ctx = context(Operation::FetchById, Some(7));
        match response(200, BAT, &ctx).decode(&ctx).unwrap() {
            ApiOutcome::Fetched(product) => assert_eq!(product.code, "B1"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn list_decodes_array() {
        let ctx = context(Operation::ListAll, None);
        let body = format!("[{BAT},{BAT}]");
        match response(200, &body, &ctx).decode(&ctx).unwrap() {
            ApiOutcome::Listed(products) => assert_eq!(products.len(), 2),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn update_ignores_body() {
        let ctx = context(Operation::Update, Some(7));
        assert_eq!(response(200, "not json at all", &ctx).decode(&ctx).unwrap(), ApiOutcome::Updated);
    }

    #[test]
    fn delete_uses_detail_and_context_id() {
        let ctx = context(Operation::Delete, Some(3));
        assert_eq!(
            response(200, r#"{"detail":"Deleted"}"#, &ctx).decode(&ctx).unwrap(),
            ApiOutcome::Deleted { id: 3, detail: "Deleted".into() }
        );
    }

    #[test]
    fn delete_without_id_is_a_context_error() {
        let ctx = context(Operation::Delete, None);
        assert!(matches!(
            response(200, r#"{"detail":"Deleted"}"#, &ctx).decode(&ctx),
            Err(InventoryError::Context(_))
        ));
    }

    #[test]
    fn any_non_success_status_fails() {
        let ctx = context(Operation::ListAll, None);
        for status in [301, 400, 404, 422, 500, 503] {
            assert!(matches!(
                response(status, "[]", &ctx).decode(&ctx),
                Err(InventoryError::Http { status: s }) if s == status
            ));
        }
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let ctx = context(Operation::Create, None);
        assert!(matches!(
            response(201, "{\"id\":", &ctx).decode(&ctx),
            Err(InventoryError::Decode(_))
        ));
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let ctx = context(Operation::ListAll, None);
        assert!(matches!(
            response(200, BAT, &ctx).decode(&ctx),
            Err(InventoryError::Decode(_))
        ));
    }
}
