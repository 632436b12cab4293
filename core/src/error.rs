//! Error types for the inventory API client.
//!
//! # Design
//! `Api` gets a dedicated variant because the server only sends a decodable
//! error body for a couple of status codes on create, and callers show that
//! message verbatim. Every other non-2xx response lands in
//! `BadServerResponse` regardless of its body.

use thiserror::Error;

/// Errors returned by the inventory client and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint could not be parsed as a URL. Only happens with a bad
    /// base URL, which `ClientConfig` rejects up front.
    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    /// Non-2xx status outside the structured-error path.
    #[error("bad server response (HTTP {status})")]
    BadServerResponse { status: u16 },

    /// The response body did not match the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The server rejected the request with a structured error body.
    #[error("{message} (code {code})")]
    Api { code: i64, message: String },

    /// The network round trip itself failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors raised while assembling a `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("INVENTORY_API_TOKEN is not set")]
    MissingToken,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
