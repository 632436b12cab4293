use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::api::InventoryApi;
use crate::screens::CreationEvent;
use crate::types::Inventory;

/// One table row: id on the left, title on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub id: String,
    pub title: String,
}

/// State behind the inventory list screen.
pub struct InventoryListing {
    api: Arc<dyn InventoryApi>,
    events: UnboundedReceiver<CreationEvent>,
    items: Vec<Inventory>,

    /// Last load error, shown as an alert.
    pub alert: Option<String>,
    /// Success message after a create.
    pub notice: Option<String>,
    pub form_presented: bool,
}

impl InventoryListing {
    pub fn new(api: Arc<dyn InventoryApi>, events: UnboundedReceiver<CreationEvent>) -> Self {
        Self {
            api,
            events,
            items: Vec::new(),
            alert: None,
            notice: None,
            form_presented: false,
        }
    }

    pub fn items(&self) -> &[Inventory] {
        &self.items
    }

    pub fn rows(&self) -> Vec<InventoryRow> {
        self.items
            .iter()
            .map(|item| InventoryRow {
                id: item.id.to_string(),
                title: item.title.clone(),
            })
            .collect()
    }

    /// Id for the detail screen when row `index` is selected.
    pub fn select(&self, index: usize) -> Option<i64> {
        self.items.get(index).map(|item| item.id)
    }

    /// Reload from the API. On failure the previous items stay visible.
    pub async fn refresh(&mut self) {
        match self.api.list_inventories().await {
            Ok(items) => {
                debug!(count = items.len(), "inventories loaded");
                self.items = items;
                self.alert = None;
            }
            Err(err) => {
                warn!(error = %err, "failed to load inventories");
                self.alert = Some(err.to_string());
            }
        }
    }

    pub fn present_form(&mut self) {
        self.form_presented = true;
    }

    pub async fn handle_event(&mut self, event: CreationEvent) {
        self.form_presented = false;
        if let CreationEvent::Created(id) = event {
            self.refresh().await;
            self.notice = Some(format!("Inventory ID: {id} was created"));
        }
    }

    /// Wait for the next event from the form. `None` once every sender is gone.
    pub async fn recv_event(&mut self) -> Option<CreationEvent> {
        self.events.recv().await
    }
}
