use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_TOKEN: &str = "dev-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    pub id: i64,
    pub title: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub item_image: Option<ItemImage>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemImage {
    pub url: String,
}

#[derive(Deserialize)]
pub struct CreateInventory {
    #[serde(default)]
    pub title: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateResponse {
    pub code: i64,
    pub status: String,
    pub message: String,
    pub data_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: i64,
    pub status: String,
    pub message: String,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    items: BTreeMap<i64, Inventory>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    token: Arc<str>,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        token: Arc::from(token),
    };
    Router::new()
        .route("/api/v1/inventories", get(list_inventories).post(create_inventory))
        .route("/api/v1/inventories/{id}", get(get_inventory))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_token(listener, DEFAULT_TOKEN).await
}

pub async fn run_with_token(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn authorize(headers: &HeaderMap, token: &str) -> Result<(), StatusCode> {
    let expected = format!("Bearer {token}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn rejection(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            code: i64::from(status.as_u16()),
            status: "error".to_string(),
            message: message.to_string(),
        }),
    )
}

async fn list_inventories(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Inventory>>, StatusCode> {
    authorize(&headers, &state.token)?;
    let store = state.db.read().await;
    Ok(Json(store.items.values().cloned().collect()))
}

async fn get_inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Inventory>, StatusCode> {
    authorize(&headers, &state.token)?;
    let store = state.db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateInventory>,
) -> Result<Json<CreateResponse>, Response> {
    authorize(&headers, &state.token).map_err(IntoResponse::into_response)?;
    if input.title.is_empty() {
        return Err(rejection(StatusCode::BAD_REQUEST, "Title is required").into_response());
    }
    if let Some(quantity) = &input.quantity {
        if quantity.parse::<f64>().is_err() {
            return Err(
                rejection(StatusCode::NOT_ACCEPTABLE, "Quantity must be numeric").into_response(),
            );
        }
    }

    let mut store = state.db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    store.items.insert(
        id,
        Inventory {
            id,
            title: input.title,
            quantity: input.quantity,
            unit: input.unit,
            item_image: None,
        },
    );
    info!(id, "inventory created");

    Ok(Json(CreateResponse {
        code: 200,
        status: "success".to_string(),
        message: "Data was successfully created.".to_string(),
        data_id: id,
    }))
}
