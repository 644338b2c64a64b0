use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{CheckoutDraft, MenuResponse, OrderConfirmation, ServiceError};
use crate::observability::Metrics;
use crate::services::{CartCheckout, CheckoutSnapshot, MenuLoader};

/// Request model for adding one unit of a menu item to the cart
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartLineRequest {
    pub item_id: String,
}

/// Request model for changing a cart line's quantity.
///
/// The quantity is signed on purpose: zero and negative values flow through
/// the removal path.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartLineRequest {
    pub quantity: i64,
}

/// Request model for submitting the order
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub delivery_address: String,
}

/// State shared by the API handlers
#[derive(Clone)]
pub struct ApiState {
    pub menu_loader: Arc<MenuLoader>,
    pub checkout: Arc<CartCheckout>,
    pub metrics: Arc<Metrics>,
}

/// Get the menu listing
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<ApiState>,
) -> Result<Json<MenuResponse>, (StatusCode, Json<Value>)> {
    match state.menu_loader.menu_response().await {
        Ok(menu) => {
            info!("Menu listed with {} items", menu.total_count);
            Ok(Json(menu))
        }
        Err(err) => {
            error!("Failed to list menu: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get the current cart and checkout state
#[instrument(skip(state))]
pub async fn get_cart(State(state): State<ApiState>) -> Json<CheckoutSnapshot> {
    Json(state.checkout.snapshot().await)
}

/// Add one unit of a menu item to the cart
#[instrument(skip(state, request), fields(item_id = %request.item_id))]
pub async fn add_cart_line(
    State(state): State<ApiState>,
    Json(request): Json<AddCartLineRequest>,
) -> Result<(StatusCode, Json<CheckoutSnapshot>), (StatusCode, Json<Value>)> {
    let item = match state.menu_loader.find_item(&request.item_id).await {
        Ok(item) => item,
        Err(err) => {
            error!("Failed to resolve menu item: {}", err);
            state.metrics.record_cart_operation("add_item", false);
            return Err(service_error_to_response(err));
        }
    };

    state.checkout.add_item(&item).await;
    state.metrics.record_cart_operation("add_item", true);

    info!("Item added to cart");
    Ok((StatusCode::CREATED, Json(state.checkout.snapshot().await)))
}

/// Change the quantity of a cart line; zero or less removes it
#[instrument(skip(state, request), fields(item_id = %item_id, quantity = request.quantity))]
pub async fn update_cart_line(
    State(state): State<ApiState>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateCartLineRequest>,
) -> Json<CheckoutSnapshot> {
    let changed = state.checkout.set_quantity(&item_id, request.quantity).await;
    state.metrics.record_cart_operation("set_quantity", changed);

    info!(changed, "Cart line quantity updated");
    Json(state.checkout.snapshot().await)
}

/// Remove a cart line
#[instrument(skip(state), fields(item_id = %item_id))]
pub async fn remove_cart_line(
    State(state): State<ApiState>,
    Path(item_id): Path<String>,
) -> StatusCode {
    let removed = state.checkout.remove_item(&item_id).await;
    state.metrics.record_cart_operation("remove_item", removed);

    info!(removed, "Cart line removed");
    StatusCode::NO_CONTENT
}

/// Submit the current cart as an order
#[instrument(skip(state, request))]
pub async fn checkout(
    State(state): State<ApiState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderConfirmation>), (StatusCode, Json<Value>)> {
    let draft = CheckoutDraft::new(request.customer_name, request.delivery_address);

    match state.checkout.submit(&draft).await {
        Ok(confirmation) => {
            state.metrics.record_order_submission(true);
            info!(order_id = %confirmation.order_id, "Order placed");
            Ok((StatusCode::CREATED, Json(confirmation)))
        }
        Err(err) => {
            // Guard rejections are not counted as submission outcomes; only
            // calls that reached the order service are.
            if matches!(err, ServiceError::Submit { .. }) {
                state.metrics.record_order_submission(false);
            }
            error!("Checkout failed: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Reset the session for a new order, discarding the last confirmation
#[instrument(skip(state))]
pub async fn new_order(
    State(state): State<ApiState>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    match state.checkout.start_new_order().await {
        Ok(()) => {
            info!("New order started");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            error!("Failed to start new order: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Convert ServiceError to HTTP response
fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        ServiceError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::ValidationError { .. } => StatusCode::BAD_REQUEST,
        ServiceError::EmptyCart => StatusCode::CONFLICT,
        ServiceError::SubmissionInFlight => StatusCode::CONFLICT,
        ServiceError::MenuNotReady => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::MenuUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Submit { .. } => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(json!({
            "error": err.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
