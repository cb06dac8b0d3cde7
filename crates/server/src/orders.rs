//! Order API endpoints

use api_types::{
    Message,
    order::{OrderItem, OrderListQuery, OrderNew, OrderUpdate, OrderView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, required, server::ServerState};

fn order_view(order: engine::Order) -> OrderView {
    OrderView {
        id: order.id,
        order_number: order.order_number,
        customer_name: order.customer_name,
        customer_phone: order.customer_phone,
        customer_address: order.customer_address,
        store_id: order.store_id,
        store_name: order.store_name,
        items: order.items.into_iter().map(order_item_view).collect(),
        total_amount: order.total_amount,
        status: order.status.as_str().to_string(),
        payment_method: order.payment_method.as_str().to_string(),
        notes: order.notes,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

fn order_item_view(item: engine::OrderItem) -> OrderItem {
    OrderItem {
        product_id: item.product_id,
        product_name: item.product_name,
        quantity: item.quantity,
        price: item.price,
        subtotal: item.subtotal,
    }
}

fn order_item(item: OrderItem) -> engine::OrderItem {
    engine::OrderItem {
        product_id: item.product_id,
        product_name: item.product_name,
        quantity: item.quantity,
        price: item.price,
        subtotal: item.subtotal,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderView>>, ServerError> {
    let orders = match query.customer_phone.as_deref() {
        Some(phone) => state.engine.list_orders_for_phone(phone).await?,
        None => state.engine.list_orders().await?,
    };
    Ok(Json(orders.into_iter().map(order_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ServerError> {
    let order = state.engine.order(&id).await?;
    Ok(Json(order_view(order)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderNew>,
) -> Result<Json<OrderView>, ServerError> {
    let payment_method = match payload.payment_method.as_deref() {
        Some(method) => {
            Some(engine::PaymentMethod::try_from(method).map_err(ServerError::from)?)
        }
        None => None,
    };

    let cmd = engine::OrderCmd {
        customer_name: required(payload.customer_name, "customerName")?,
        customer_phone: required(payload.customer_phone, "customerPhone")?,
        customer_address: required(payload.customer_address, "customerAddress")?,
        store_id: payload.store_id,
        store_name: payload.store_name,
        items: required(payload.items, "items")?
            .into_iter()
            .map(order_item)
            .collect(),
        total_amount: required(payload.total_amount, "totalAmount")?,
        payment_method,
        notes: payload.notes,
    };
    let order = state.engine.new_order(cmd).await?;
    Ok(Json(order_view(order)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> Result<Json<OrderView>, ServerError> {
    let status = match payload.status.as_deref() {
        Some(status) => Some(engine::OrderStatus::try_from(status).map_err(ServerError::from)?),
        None => None,
    };

    let update = engine::OrderUpdate {
        status,
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_address: payload.customer_address,
        notes: payload.notes,
    };
    let order = state.engine.update_order(&id, update).await?;
    Ok(Json(order_view(order)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_order(&id).await?;
    Ok(Json(Message {
        ok: true,
        message: "order deleted".to_string(),
    }))
}
