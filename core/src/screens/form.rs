use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::InventoryApi;
use crate::screens::CreationEvent;
use crate::types::InventoryCreateRequest;

pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a title";

/// State behind the create-inventory form.
///
/// The renderer binds the three text fields and shows `alert` when set.
/// The loading flag is a watch channel so it can be observed while `submit`
/// holds the form mutably.
pub struct CreateInventoryForm {
    api: Arc<dyn InventoryApi>,
    events: UnboundedSender<CreationEvent>,

    pub title: String,
    pub quantity: String,
    pub unit: String,

    loading: watch::Sender<bool>,
    pub is_success: bool,
    pub alert: Option<String>,
    pub created_id: Option<i64>,
}

impl CreateInventoryForm {
    pub fn new(api: Arc<dyn InventoryApi>, events: UnboundedSender<CreationEvent>) -> Self {
        Self {
            api,
            events,
            title: String::new(),
            quantity: String::new(),
            unit: String::new(),
            loading: watch::Sender::new(false),
            is_success: false,
            alert: None,
            created_id: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }

    /// Strip everything but ASCII digits from the quantity field.
    pub fn sanitize_quantity(&mut self) {
        self.quantity.retain(|c| c.is_ascii_digit());
    }

    pub fn to_request(&self) -> InventoryCreateRequest {
        InventoryCreateRequest::from_form(&self.title, &self.quantity, &self.unit)
    }

    /// Validate and send the form. Returns the new id on success.
    pub async fn submit(&mut self) -> Option<i64> {
        if !self.is_valid() {
            self.alert = Some(EMPTY_TITLE_MESSAGE.to_string());
            return None;
        }

        let request = self.to_request();
        let result = {
            let _loading = Loading::start(&self.loading);
            self.api.create_inventory(&request).await
        };

        match result {
            Ok(created) => {
                let id = created.data_id;
                info!(id, "inventory created");
                self.is_success = true;
                self.created_id = Some(id);
                self.alert = Some(format!("Inventory created (ID: {id})"));
                self.title.clear();
                self.quantity.clear();
                self.unit.clear();
                self.api.token_did_update();
                self.notify(CreationEvent::Created(id));
                Some(id)
            }
            Err(err) => {
                warn!(error = %err, "inventory creation failed");
                self.is_success = false;
                self.alert = Some(format!("Error: {err}"));
                None
            }
        }
    }

    pub fn cancel(&self) {
        self.notify(CreationEvent::Cancelled);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn notify(&self, event: CreationEvent) {
        // The list screen may already be gone; nothing to tell then.
        if self.events.send(event).is_err() {
            warn!(?event, "no listener for creation event");
        }
    }
}

/// Holds the loading flag up until dropped, including when `submit` is
/// cancelled mid-flight.
struct Loading<'a>(&'a watch::Sender<bool>);

impl<'a> Loading<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
