//! Stateless HTTP request builder and response parser for the inventory API.
//!
//! # Design
//! `InventoryClient` holds only the immutable `ClientConfig` and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round trip.
//!
//! Status handling differs between reads and the create call: reads only
//! know success and failure, while create decodes a structured error body for
//! 400 and 406. See `ResponseClass`.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Inventory, InventoryCreateErrorResponse, InventoryCreateRequest, InventoryCreateResponse,
};

const INVENTORIES_PATH: &str = "/api/v1/inventories";

/// How a response status is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 200..=299: decode the success body.
    Success,
    /// 400 or 406 on create: decode the error body into `ApiError::Api`.
    StructuredClientError,
    /// Anything else: `ApiError::BadServerResponse`, body ignored.
    GenericFailure,
}

impl ResponseClass {
    pub fn for_read(status: u16) -> Self {
        match status {
            200..=299 => ResponseClass::Success,
            _ => ResponseClass::GenericFailure,
        }
    }

    // Only these two codes carry a decodable body; other 4xx stay generic.
    pub fn for_write(status: u16) -> Self {
        match status {
            200..=299 => ResponseClass::Success,
            400 | 406 => ResponseClass::StructuredClientError,
            _ => ResponseClass::GenericFailure,
        }
    }
}

/// Synchronous, stateless client for the inventory API.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    config: ClientConfig,
}

impl InventoryClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_list_inventories(&self) -> HttpRequest {
        self.get(INVENTORIES_PATH.to_string())
    }

    /// Without an id this targets the collection endpoint but still expects a
    /// single object back.
    pub fn build_fetch_inventory(&self, id: Option<i64>) -> HttpRequest {
        let path = match id {
            Some(id) => format!("{INVENTORIES_PATH}/{id}"),
            None => INVENTORIES_PATH.to_string(),
        };
        self.get(path)
    }

    pub fn build_create_inventory(
        &self,
        input: &InventoryCreateRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut headers = self.auth_headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(INVENTORIES_PATH),
            headers,
            body: Some(body),
        })
    }

    pub fn parse_list_inventories(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Inventory>, ApiError> {
        parse_read(response)
    }

    pub fn parse_fetch_inventory(&self, response: HttpResponse) -> Result<Inventory, ApiError> {
        parse_read(response)
    }

    pub fn parse_create_inventory(
        &self,
        response: HttpResponse,
    ) -> Result<InventoryCreateResponse, ApiError> {
        match ResponseClass::for_write(response.status) {
            ResponseClass::Success => decode(&response.body),
            ResponseClass::StructuredClientError => {
                let err: InventoryCreateErrorResponse = decode(&response.body)?;
                warn!(
                    status = response.status,
                    code = err.code,
                    message = %err.message,
                    "create rejected"
                );
                Err(ApiError::Api {
                    code: err.code,
                    message: err.message,
                })
            }
            ResponseClass::GenericFailure => Err(bad_status(response.status)),
        }
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(&path),
            headers: self.auth_headers(),
            body: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![(
            "authorization".to_string(),
            format!("Bearer {}", self.config.token()),
        )]
    }
}

fn parse_read<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    match ResponseClass::for_read(response.status) {
        ResponseClass::Success => decode(&response.body),
        _ => Err(bad_status(response.status)),
    }
}

fn bad_status(status: u16) -> ApiError {
    warn!(status, "unexpected response status");
    ApiError::BadServerResponse { status }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> InventoryClient {
        InventoryClient::new(ClientConfig::new("https://api.test", "tok").unwrap())
    }

    #[test]
    fn build_list_inventories_produces_correct_request() {
        let req = client().build_list_inventories();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.test/api/v1/inventories");
        assert!(req.body.is_none());
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn build_fetch_inventory_paths_depend_on_id() {
        let with_id = client().build_fetch_inventory(Some(42));
        let without = client().build_fetch_inventory(None);
        assert_eq!(with_id.url, "https://api.test/api/v1/inventories/42");
        assert_eq!(without.url, "https://api.test/api/v1/inventories");
        assert_eq!(with_id.method, without.method);
        assert_eq!(with_id.headers, without.headers);
    }

    #[test]
    fn build_create_inventory_produces_correct_request() {
        let input = InventoryCreateRequest::from_form("Widget", "10", "box");
        let req = client().build_create_inventory(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://api.test/api/v1/inventories");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"title":"Widget","quantity":"10","unit":"box"}"#)
        );
    }

    #[test]
    fn read_classifier_has_two_branches() {
        assert_eq!(ResponseClass::for_read(200), ResponseClass::Success);
        assert_eq!(ResponseClass::for_read(299), ResponseClass::Success);
        assert_eq!(ResponseClass::for_read(400), ResponseClass::GenericFailure);
        assert_eq!(ResponseClass::for_read(406), ResponseClass::GenericFailure);
        assert_eq!(ResponseClass::for_read(300), ResponseClass::GenericFailure);
    }

    #[test]
    fn write_classifier_only_structures_400_and_406() {
        assert_eq!(ResponseClass::for_write(201), ResponseClass::Success);
        assert_eq!(ResponseClass::for_write(400), ResponseClass::StructuredClientError);
        assert_eq!(ResponseClass::for_write(406), ResponseClass::StructuredClientError);
        for status in [199, 300, 401, 403, 404, 422, 500, 503] {
            assert_eq!(ResponseClass::for_write(status), ResponseClass::GenericFailure, "{status}");
        }
    }

    #[test]
    fn parse_list_inventories_success_preserves_order() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":2,"title":"B","quantity":"1"},{"id":1,"title":"A","quantity":5}]"#,
        );
        let items = client().parse_list_inventories(response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 2);
        assert_eq!(items[1].quantity.as_deref(), Some("5"));
    }

    #[test]
    fn parse_list_inventories_bad_json() {
        let err = client()
            .parse_list_inventories(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_fetch_inventory_ignores_error_body() {
        let response = HttpResponse::new(400, r#"{"code":400,"status":"error","message":"nope"}"#);
        let err = client().parse_fetch_inventory(response).unwrap_err();
        assert!(matches!(err, ApiError::BadServerResponse { status: 400 }));
    }

    #[test]
    fn parse_create_inventory_success() {
        let response = HttpResponse::new(
            200,
            r#"{"code":200,"status":"success","message":"ok","data_id":12345}"#,
        );
        let created = client().parse_create_inventory(response).unwrap();
        assert_eq!(created.data_id, 12345);
        assert_eq!(created.status, "success");
    }

    #[test]
    fn parse_create_inventory_structured_error() {
        let response = HttpResponse::new(
            400,
            r#"{"code":400,"status":"error","message":"Title is required"}"#,
        );
        let err = client().parse_create_inventory(response).unwrap_err();
        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Title is required");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn parse_create_inventory_406_uses_body_code() {
        let response = HttpResponse::new(
            406,
            r#"{"code":4061,"status":"error","message":"Quantity must be numeric"}"#,
        );
        let err = client().parse_create_inventory(response).unwrap_err();
        assert!(matches!(err, ApiError::Api { code: 4061, .. }));
    }

    #[test]
    fn parse_create_inventory_undecodable_error_body() {
        let err = client()
            .parse_create_inventory(HttpResponse::new(406, "<html>nope</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_create_inventory_500_ignores_body() {
        let response = HttpResponse::new(
            500,
            r#"{"code":500,"status":"error","message":"boom"}"#,
        );
        let err = client().parse_create_inventory(response).unwrap_err();
        assert!(matches!(err, ApiError::BadServerResponse { status: 500 }));
    }

    #[test]
    fn parse_create_inventory_wrong_shape_is_decode_error() {
        let response = HttpResponse::new(200, r#"{"code":200,"status":"success"}"#);
        let err = client().parse_create_inventory(response).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
