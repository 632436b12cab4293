use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::InventoryApi;
use crate::error::ApiError;
use crate::screens::slot::{LatestSlot, Ticket};
use crate::types::Inventory;

/// A labelled detail row. The image row carries the URL, if any, instead of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRow {
    Text { label: &'static str, value: String },
    Image { label: &'static str, url: Option<String> },
}

/// A fetch started by `InventoryDetail::begin_load`, run outside the borrow
/// of the screen and handed back through `finish_load`.
pub struct PendingLoad {
    api: Arc<dyn InventoryApi>,
    id: i64,
    ticket: Ticket,
}

impl PendingLoad {
    pub async fn run(self) -> (Ticket, Result<Inventory, ApiError>) {
        let result = self.api.fetch_inventory(Some(self.id)).await;
        (self.ticket, result)
    }
}

/// State behind the detail screen for one inventory id.
pub struct InventoryDetail {
    api: Arc<dyn InventoryApi>,
    id: i64,
    inventory: LatestSlot<Inventory>,
    image: LatestSlot<Vec<u8>>,
    pub alert: Option<String>,
}

impl InventoryDetail {
    pub fn new(api: Arc<dyn InventoryApi>, id: i64) -> Self {
        Self {
            api,
            id,
            inventory: LatestSlot::new(),
            image: LatestSlot::new(),
            alert: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.inventory.get()
    }

    /// Start a fetch; any fetch started earlier becomes stale.
    pub fn begin_load(&mut self) -> PendingLoad {
        PendingLoad {
            api: Arc::clone(&self.api),
            id: self.id,
            ticket: self.inventory.begin(),
        }
    }

    /// Apply a finished fetch. Returns false if it was superseded.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Inventory, ApiError>) -> bool {
        if !self.inventory.is_current(ticket) {
            debug!(id = self.id, "discarding stale inventory fetch");
            return false;
        }
        match result {
            Ok(inventory) => {
                self.alert = None;
                self.image.reset();
                self.inventory.complete(ticket, inventory)
            }
            Err(err) => {
                warn!(id = self.id, error = %err, "failed to load inventory");
                self.alert = Some(err.to_string());
                false
            }
        }
    }

    pub async fn load(&mut self) -> bool {
        let (ticket, result) = self.begin_load().run().await;
        self.finish_load(ticket, result)
    }

    pub fn rows(&self) -> Vec<DetailRow> {
        let inventory = self.inventory.get();
        vec![
            DetailRow::Text {
                label: "ID",
                value: inventory.map_or(0, |i| i.id).to_string(),
            },
            DetailRow::Text {
                label: "Title",
                value: inventory.map(|i| i.title.clone()).unwrap_or_default(),
            },
            DetailRow::Text {
                label: "Quantity",
                value: inventory
                    .and_then(|i| i.quantity.clone())
                    .unwrap_or_else(|| "0".to_string()),
            },
            DetailRow::Image {
                label: "Image",
                url: self.image_url().map(str::to_string),
            },
        ]
    }

    pub fn image_url(&self) -> Option<&str> {
        self.inventory
            .get()
            .and_then(|i| i.item_image.as_ref())
            .map(|image| image.url.as_str())
    }

    /// Start loading the image for the current inventory. The caller downloads
    /// the URL and reports back through `finish_image_load`.
    pub fn begin_image_load(&mut self) -> Option<(Ticket, String)> {
        let url = self.image_url()?.to_string();
        Some((self.image.begin(), url))
    }

    pub fn finish_image_load(&mut self, ticket: Ticket, bytes: Vec<u8>) -> bool {
        self.image.complete(ticket, bytes)
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.get().map(Vec::as_slice)
    }
}
