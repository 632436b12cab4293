//! Client core for the inventory API.
//!
//! # Overview
//! `InventoryClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern).
//! `HttpInventoryApi` pairs it with a `Transport` to provide the async
//! `InventoryApi` capability that the screen state in `screens` consumes.
//!
//! # Design
//! - The client holds only an immutable `ClientConfig` (base URL and bearer
//!   token), so concurrent calls share nothing mutable.
//! - Reads succeed only on 2xx. Create additionally decodes a structured
//!   error body for 400 and 406; every other status is a bad server response.
//! - `InventoryApi` is injected as `Arc<dyn InventoryApi>`; `MockInventoryApi`
//!   stands in for it in tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod screens;
pub mod transport;
pub mod types;

pub use api::{HttpInventoryApi, InventoryApi};
pub use client::{InventoryClient, ResponseClass};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mock::{MockCalls, MockInventoryApi};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Inventory, InventoryCreateErrorResponse, InventoryCreateRequest, InventoryCreateResponse,
    ItemImage,
};
