//! The async capability screens depend on.
//!
//! # Design
//! `InventoryApi` is object safe so a consumer can hold an
//! `Arc<dyn InventoryApi>` and receive either `HttpInventoryApi` or
//! `MockInventoryApi` at construction time. `HttpInventoryApi` only pairs the
//! stateless `InventoryClient` with a `Transport`; dropping one of its futures
//! cancels the round trip and leaves nothing behind.

use async_trait::async_trait;
use tracing::debug;

use crate::client::InventoryClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Inventory, InventoryCreateRequest, InventoryCreateResponse};

#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_inventories(&self) -> Result<Vec<Inventory>, ApiError>;

    async fn fetch_inventory(&self, id: Option<i64>) -> Result<Inventory, ApiError>;

    async fn create_inventory(
        &self,
        request: &InventoryCreateRequest,
    ) -> Result<InventoryCreateResponse, ApiError>;

    /// Called by consumers after a successful create. Reserved for credential
    /// rotation.
    fn token_did_update(&self);
}

/// Production implementation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi<T = ReqwestTransport> {
    client: InventoryClient,
    transport: T,
}

impl HttpInventoryApi<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> HttpInventoryApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: InventoryClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &InventoryClient {
        &self.client
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            body = request.body.as_deref().unwrap_or(""),
            "API request"
        );
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, body = %response.body, "API response");
        Ok(response)
    }
}

#[async_trait]
impl<T: Transport> InventoryApi for HttpInventoryApi<T> {
    async fn list_inventories(&self) -> Result<Vec<Inventory>, ApiError> {
        let response = self.round_trip(self.client.build_list_inventories()).await?;
        self.client.parse_list_inventories(response)
    }

    async fn fetch_inventory(&self, id: Option<i64>) -> Result<Inventory, ApiError> {
        let response = self.round_trip(self.client.build_fetch_inventory(id)).await?;
        self.client.parse_fetch_inventory(response)
    }

    async fn create_inventory(
        &self,
        request: &InventoryCreateRequest,
    ) -> Result<InventoryCreateResponse, ApiError> {
        let http_request = self.client.build_create_inventory(request)?;
        let response = self.round_trip(http_request).await?;
        self.client.parse_create_inventory(response)
    }

    fn token_did_update(&self) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;

    /// Replies with a fixed response and records what it was asked to send.
    struct CannedTransport {
        reply: Result<HttpResponse, fn() -> ApiError>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpResponse::new(status, body)),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> ApiError) -> Self {
            Self {
                reply: Err(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(request);
            match &self.reply {
                Ok(response) => Ok(response.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn api(transport: CannedTransport) -> HttpInventoryApi<CannedTransport> {
        let config = ClientConfig::new("https://api.test", "tok").unwrap();
        HttpInventoryApi::with_transport(config, transport)
    }

    #[tokio::test]
    async fn create_success_yields_data_id() {
        let transport = CannedTransport::replying(
            200,
            r#"{"code":200,"status":"success","message":"ok","data_id":12345}"#,
        );
        let api = api(transport);
        let created = api
            .create_inventory(&InventoryCreateRequest::new("Widget"))
            .await
            .unwrap();
        assert_eq!(created.data_id, 12345);

        let sent = api.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"title":"Widget"}"#));
    }

    #[tokio::test]
    async fn create_400_is_structured() {
        let transport = CannedTransport::replying(
            400,
            r#"{"code":400,"status":"error","message":"Title is required"}"#,
        );
        let err = api(transport)
            .create_inventory(&InventoryCreateRequest::new(""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { code: 400, ref message } if message == "Title is required"
        ));
    }

    #[tokio::test]
    async fn create_500_is_generic_whatever_the_body() {
        for body in ["", "oops", r#"{"code":500,"status":"error","message":"x"}"#] {
            let transport = CannedTransport::replying(500, body);
            let err = api(transport)
                .create_inventory(&InventoryCreateRequest::new("Widget"))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::BadServerResponse { status: 500 }), "{body}");
        }
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let transport = CannedTransport::failing(|| ApiError::Transport("offline".to_string()));
        let err = api(transport).list_inventories().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn fetch_with_and_without_id_share_handling() {
        let body = r#"{"id":42,"title":"Bolt","quantity":"3"}"#;
        let transport = CannedTransport::replying(200, body);
        let api = api(transport);

        let with_id = api.fetch_inventory(Some(42)).await.unwrap();
        let without = api.fetch_inventory(None).await.unwrap();
        assert_eq!(with_id, without);

        let sent = api.transport.sent();
        assert_eq!(sent[0].url, "https://api.test/api/v1/inventories/42");
        assert_eq!(sent[1].url, "https://api.test/api/v1/inventories");
    }

    #[tokio::test]
    async fn fetch_without_id_against_array_body_is_decode_error() {
        let transport = CannedTransport::replying(200, r#"[{"id":1,"title":"A"}]"#);
        let err = api(transport).fetch_inventory(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn list_twice_is_structurally_equal() {
        let transport = CannedTransport::replying(
            200,
            r#"[{"id":1,"title":"A"},{"id":2,"title":"B","item_image":{"url":"u"}}]"#,
        );
        let api = api(transport);
        let first = api.list_inventories().await.unwrap();
        let second = api.list_inventories().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let transport = CannedTransport::replying(200, "[]");
        let api = api(transport);
        let dyn_api: &dyn InventoryApi = &api;
        assert!(dyn_api.list_inventories().await.unwrap().is_empty());
        dyn_api.token_did_update();
    }
}
