//! Order service handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use shopflow_core::{Order, OrderId, OrderRequest, OrderStatus, DEFAULT_PAGE_SIZE};

use crate::error::ApiError;
use crate::extract::{authorization_header, AuthCaller, ValidatedJson};
use crate::handlers::SuccessResponse;
use crate::state::OrderState;

/// Response of `POST /order`.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    /// Outcome message.
    pub success: String,
    /// Identifier of the recorded order, present even when the debit failed.
    pub order_id: OrderId,
    /// Recorded status.
    pub status: OrderStatus,
}

/// Query of `GET /orders`.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// Whose orders to list. Empty means the caller's own.
    pub user: Option<String>,
}

fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid order id: {raw}")))
}

/// Place an order.
///
/// Answers 200 whenever the caller authenticated, even if the debit failed;
/// the body's `status` tells the two apart. A malformed body is only
/// reported to authenticated callers.
pub async fn create_order(
    State(state): State<Arc<OrderState>>,
    headers: HeaderMap,
    body: Result<ValidatedJson<OrderRequest>, ApiError>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let header = authorization_header(&headers);

    let request = match body {
        Ok(ValidatedJson(request)) => request,
        Err(err) => {
            state.relay.authenticate(header).await?;
            return Err(err);
        }
    };

    let placed = state.coordinator.place_order(header, request).await?;

    Ok(Json(CreateOrderResponse {
        success: placed.outcome.message().to_string(),
        order_id: placed.order_id,
        status: placed.status,
    }))
}

/// Get one order.
pub async fn get_order(
    State(state): State<Arc<OrderState>>,
    _auth: AuthCaller,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order_id = parse_order_id(&order_id)?;

    let order = state
        .orders
        .get_order(&order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order not found: {order_id}")))?;

    Ok(Json(order))
}

/// List orders.
///
/// - `?user=<name>`: every order of that user
/// - `?user=`: every order of the caller
/// - no query: the first page of all orders
pub async fn list_orders(
    State(state): State<Arc<OrderState>>,
    AuthCaller(caller): AuthCaller,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = match query.user.as_deref().map(str::trim) {
        Some("") => state.orders.list_orders_by_user(caller.login()).await?,
        Some(user) => state.orders.list_orders_by_user(user).await?,
        None => state.orders.list_orders(DEFAULT_PAGE_SIZE, 0).await?,
    };

    Ok(Json(orders))
}

/// Delete an order.
pub async fn delete_order(
    State(state): State<Arc<OrderState>>,
    AuthCaller(caller): AuthCaller,
    Path(order_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let order_id = parse_order_id(&order_id)?;

    state.orders.delete_order(&order_id).await?;

    tracing::info!(order_id = %order_id, deleted_by = %caller.login(), "Order deleted");

    Ok(Json(SuccessResponse::new("order successfully deleted")))
}
