//! Headless state for the list, detail and create screens.
//!
//! # Design
//! Each screen receives its `Arc<dyn InventoryApi>` at construction. The
//! create form reports back to the list over an mpsc channel created by
//! whoever wires the two together, so neither screen knows the other's type.

pub mod detail;
pub mod form;
pub mod listing;
pub mod slot;

pub use detail::{DetailRow, InventoryDetail, PendingLoad};
pub use form::CreateInventoryForm;
pub use listing::{InventoryListing, InventoryRow};
pub use slot::{LatestSlot, Ticket};

use tokio::sync::mpsc;

/// Sent by the create form when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationEvent {
    Created(i64),
    Cancelled,
}

/// Channel connecting a `CreateInventoryForm` to an `InventoryListing`.
pub fn creation_channel() -> (
    mpsc::UnboundedSender<CreationEvent>,
    mpsc::UnboundedReceiver<CreationEvent>,
) {
    mpsc::unbounded_channel()
}
