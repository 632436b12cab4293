//! In-memory `InventoryApi` for exercising consumers without a network.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::InventoryApi;
use crate::error::ApiError;
use crate::types::{Inventory, InventoryCreateRequest, InventoryCreateResponse};

/// Test double with canned results, call counters and optional latency.
///
/// Errors are produced by a factory because `ApiError` is not `Clone`.
#[derive(Default)]
pub struct MockInventoryApi {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    inventories: Vec<Inventory>,
    fetch_result: Option<Inventory>,
    create_result: Option<InventoryCreateResponse>,
    error: Option<fn() -> ApiError>,
    delay: Option<Duration>,

    last_create_request: Option<InventoryCreateRequest>,
    last_fetch_id: Option<Option<i64>>,

    list_calls: usize,
    fetch_calls: usize,
    create_calls: usize,
    token_updates: usize,
}

/// Snapshot of how a `MockInventoryApi` has been used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub list: usize,
    pub fetch: usize,
    pub create: usize,
    pub token_updates: usize,
}

impl MockInventoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_inventories(&self, inventories: Vec<Inventory>) {
        self.state().inventories = inventories;
    }

    pub fn set_fetch_result(&self, inventory: Inventory) {
        self.state().fetch_result = Some(inventory);
    }

    pub fn set_create_success(&self, data_id: i64) {
        let mut state = self.state();
        state.create_result = Some(InventoryCreateResponse {
            code: 200,
            status: "success".to_string(),
            message: "Data was successfully created.".to_string(),
            data_id,
        });
        state.error = None;
    }

    /// Every subsequent operation fails with the error `make` returns.
    pub fn set_error(&self, make: fn() -> ApiError) {
        self.state().error = Some(make);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.state().delay = Some(delay);
    }

    pub fn calls(&self) -> MockCalls {
        let state = self.state();
        MockCalls {
            list: state.list_calls,
            fetch: state.fetch_calls,
            create: state.create_calls,
            token_updates: state.token_updates,
        }
    }

    pub fn last_create_request(&self) -> Option<InventoryCreateRequest> {
        self.state().last_create_request.clone()
    }

    /// `None` if fetch was never called, `Some(id)` with the argument otherwise.
    pub fn last_fetch_id(&self) -> Option<Option<i64>> {
        self.state().last_fetch_id
    }

    pub fn reset(&self) {
        *self.state() = MockState::default();
    }

    async fn pause(&self) {
        let delay = self.state().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn failure(&self) -> Option<ApiError> {
        self.state().error.map(|make| make())
    }
}

#[async_trait]
impl InventoryApi for MockInventoryApi {
    async fn list_inventories(&self) -> Result<Vec<Inventory>, ApiError> {
        self.state().list_calls += 1;
        self.pause().await;
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.state().inventories.clone())
    }

    async fn fetch_inventory(&self, id: Option<i64>) -> Result<Inventory, ApiError> {
        {
            let mut state = self.state();
            state.fetch_calls += 1;
            state.last_fetch_id = Some(id);
        }
        self.pause().await;
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let state = self.state();
        let found = state
            .fetch_result
            .clone()
            .or_else(|| state.inventories.iter().find(|i| Some(i.id) == id).cloned());
        Ok(found.unwrap_or_else(|| Inventory {
            id: id.unwrap_or(0),
            title: "Mock inventory".to_string(),
            quantity: Some("0".to_string()),
            item_image: None,
        }))
    }

    async fn create_inventory(
        &self,
        request: &InventoryCreateRequest,
    ) -> Result<InventoryCreateResponse, ApiError> {
        {
            let mut state = self.state();
            state.create_calls += 1;
            state.last_create_request = Some(request.clone());
        }
        self.pause().await;
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let state = self.state();
        Ok(state.create_result.clone().unwrap_or_else(|| InventoryCreateResponse {
            code: 200,
            status: "success".to_string(),
            message: "Data was successfully created.".to_string(),
            data_id: 10_000 + state.create_calls as i64,
        }))
    }

    fn token_did_update(&self) {
        self.state().token_updates += 1;
    }
}
