//! Request builder for the inventory service.
//!
//! [`ApiClient`] turns each of the six operations into an [`ApiRequest`]. It
//! performs no I/O; the plugin shim forwards the request to the host, and the
//! response comes back later as an event (see [`super::response`]).

use std::collections::BTreeMap;

use chrono::Utc;

use super::operation::{HttpMethod, Operation};
use super::request::{ApiRequest, RequestContext, Ticket};
use crate::domain::error::{InventoryError, Result};
use crate::domain::ProductDraft;

const PRODUCTS_PATH: &str = "/api/products/";
const RANDOM_PRODUCTS_PATH: &str = "/api/products_test/";

/// Builds requests against one inventory service base URL.
///
/// # Examples
///
/// ```
/// use stockroom::api::{ApiClient, HttpMethod, RequestFamily, RequestTracker};
///
/// let client = ApiClient::new("http://localhost:3000/");
/// let mut tracker = RequestTracker::new();
///
/// let request = client.list_all(tracker.issue(RequestFamily::Results));
/// assert_eq!(request.method, HttpMethod::Get);
/// assert_eq!(request.url, "http://localhost:3000/api/products/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Creates a client; a trailing `/` on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/products/{id}`
    #[must_use]
    pub fn fetch_by_id(&self, id: i64, ticket: Ticket) -> ApiRequest {
        self.request(
            HttpMethod::Get,
            &self.product_url(id),
            Vec::new(),
            RequestContext::new(Operation::FetchById, ticket, Some(id)),
        )
    }

    /// `GET /api/products/`
    #[must_use]
    pub fn list_all(&self, ticket: Ticket) -> ApiRequest {
        self.request(
            HttpMethod::Get,
            &self.collection_url(),
            Vec::new(),
            RequestContext::new(Operation::ListAll, ticket, None),
        )
    }

    /// `POST /api/products/` with the draft, stamped with the current time.
    ///
    /// The service may overwrite the creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Encode`] if the draft cannot be serialized.
    pub fn create(&self, draft: &ProductDraft, ticket: Ticket) -> Result<ApiRequest> {
        let stamped = ProductDraft {
            created_at: Utc::now(),
            ..draft.clone()
        };
        let body = serde_json::to_vec(&stamped).map_err(InventoryError::Encode)?;

        Ok(self.request(
            HttpMethod::Post,
            &self.collection_url(),
            body,
            RequestContext::new(Operation::Create, ticket, None),
        ))
    }

    /// `PUT /api/products/{id}` with the draft as-is.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Encode`] if the draft cannot be serialized.
    pub fn update(&self, id: i64, draft: &ProductDraft, ticket: Ticket) -> Result<ApiRequest> {
        let body = serde_json::to_vec(draft).map_err(InventoryError::Encode)?;

        Ok(self.request(
            HttpMethod::Put,
            &self.product_url(id),
            body,
            RequestContext::new(Operation::Update, ticket, Some(id)),
        ))
    }

    /// `DELETE /api/products/{id}`
    #[must_use]
    pub fn delete(&self, id: i64, ticket: Ticket) -> ApiRequest {
        self.request(
            HttpMethod::Delete,
            &self.product_url(id),
            Vec::new(),
            RequestContext::new(Operation::Delete, ticket, Some(id)),
        )
    }

    /// `POST /api/products_test/` with an empty body.
    #[must_use]
    pub fn create_random(&self, ticket: Ticket) -> ApiRequest {
        self.request(
            HttpMethod::Post,
            &format!("{}{RANDOM_PRODUCTS_PATH}", self.base_url),
            Vec::new(),
            RequestContext::new(Operation::CreateRandom, ticket, None),
        )
    }

    fn collection_url(&self) -> String {
        format!("{}{PRODUCTS_PATH}", self.base_url)
    }

    fn product_url(&self, id: i64) -> String {
        format!("{}{PRODUCTS_PATH}{id}", self.base_url)
    }

    fn request(&self, method: HttpMethod, url: &str, body: Vec<u8>, context: RequestContext) -> ApiRequest {
        tracing::debug!(
            method = ?method,
            url = %url,
            operation = context.operation.as_str(),
            seq = context.seq,
            body_len = body.len(),
            "building inventory request"
        );

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        ApiRequest {
            method,
            url: url.to_string(),
            headers,
            body,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operation::RequestFamily;
    use crate::api::request::RequestTracker;

    fn client() -> ApiClient {
        ApiClient::new("http://inventory.test:3000")
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Bat".into(),
            code: "B1".into(),
            description: "d".into(),
            category: "c".into(),
            price: 10.0,
            ..ProductDraft::default()
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(ApiClient::new("http://x:1//").base_url(), "http://x:1");
    }

    #[test]
    fn every_request_declares_json() {
        let mut tracker = RequestTracker::new();
        let request = client().delete(3, tracker.issue(RequestFamily::Delete));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn fetch_and_delete_target_the_product_path() {
        let mut tracker = RequestTracker::new();

        let fetch = client().fetch_by_id(12, tracker.issue(RequestFamily::Results));
        assert_eq!(fetch.method, HttpMethod::Get);
        assert_eq!(fetch.url, "http://inventory.test:3000/api/products/12");
        assert!(fetch.body.is_empty());
        assert_eq!(fetch.context.product_id, Some(12));

        let delete = client().delete(12, tracker.issue(RequestFamily::Delete));
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "http://inventory.test:3000/api/products/12");
        assert_eq!(delete.context.operation, Operation::Delete);
    }

    #[test]
    fn create_posts_draft_without_id() {
        let mut tracker = RequestTracker::new();
        let request = client().create(&draft(), tracker.issue(RequestFamily::Create)).unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://inventory.test:3000/api/products/");

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["name"], "Bat");
        assert_eq!(body["price"], 10.0);
        assert!(body.get("id").is_none());
        assert!(body["created_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn update_puts_full_draft_at_id() {
        let mut tracker = RequestTracker::new();
        let request = client().update(5, &draft(), tracker.issue(RequestFamily::Update)).unwrap();

        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://inventory.test:3000/api/products/5");
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["category"], "c");
        assert_eq!(request.context.product_id, Some(5));
    }

    #[test]
    fn create_random_posts_empty_body_to_test_endpoint() {
        let mut tracker = RequestTracker::new();
        let request = client().create_random(tracker.issue(RequestFamily::Random));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://inventory.test:3000/api/products_test/");
        assert!(request.body.is_empty());
    }

    #[test]
    fn context_carries_ticket() {
        let mut tracker = RequestTracker::new();
        tracker.issue(RequestFamily::Random);
        let ticket = tracker.issue(RequestFamily::Results);
        let request = client().list_all(ticket);

        assert_eq!(request.context.seq, ticket.seq);
        assert_eq!(request.context.family, RequestFamily::Results);
        assert_eq!(request.context.operation, Operation::ListAll);
    }
}
