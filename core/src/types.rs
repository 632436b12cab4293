//! Domain DTOs for the inventory API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `quantity` arrives from the server either as a JSON string or as a bare
//! number depending on how the record was created, so it is normalised to
//! text on decode.

use serde::{Deserialize, Deserializer, Serialize};

/// A single inventory record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "quantity_text")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub item_image: Option<ItemImage>,
}

/// Reference to an inventory's image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemImage {
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Text(String),
    Number(serde_json::Number),
}

fn quantity_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<QuantityRepr>::deserialize(deserializer)?;
    Ok(repr.map(|r| match r {
        QuantityRepr::Text(s) => s,
        QuantityRepr::Number(n) => n.to_string(),
    }))
}

/// Request payload for creating a new inventory.
///
/// Blank optional fields are left out of the JSON entirely so the server can
/// tell "not provided" apart from "explicitly empty".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryCreateRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub unit: Option<String>,
}

impl InventoryCreateRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            quantity: None,
            unit: None,
        }
    }

    /// Build a request from raw form text, mapping empty strings to `None`.
    pub fn from_form(title: &str, quantity: &str, unit: &str) -> Self {
        Self {
            title: title.to_string(),
            quantity: non_empty(quantity),
            unit: non_empty(unit),
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Successful create response. `data_id` is the id of the new record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryCreateResponse {
    pub code: i64,
    pub status: String,
    pub message: String,
    pub data_id: i64,
}

/// Structured error body the server sends with 400 and 406 on create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryCreateErrorResponse {
    pub code: i64,
    pub status: String,
    pub message: String,
}
