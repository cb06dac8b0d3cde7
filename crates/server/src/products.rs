//! Product catalog API endpoints

use api_types::{
    Message,
    product::{ProductListQuery, ProductNew, ProductUpdate, ProductView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, required, server::ServerState};

fn product_view(product: engine::Product) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name,
        category: product.category,
        price: product.price,
        description: product.description,
        image_url: product.image_url,
        in_stock: product.in_stock,
        quantity: product.quantity,
        rating: product.rating,
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductView>>, ServerError> {
    let products = state.engine.list_products(query.category.as_deref()).await?;
    Ok(Json(products.into_iter().map(product_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, ServerError> {
    let product = state.engine.product(&id).await?;
    Ok(Json(product_view(product)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductNew>,
) -> Result<Json<ProductView>, ServerError> {
    let cmd = engine::ProductCmd {
        name: required(payload.name, "name")?,
        category: payload.category,
        price: required(payload.price, "price")?,
        description: payload.description.unwrap_or_default(),
        image_url: payload.image_url,
        in_stock: payload.in_stock,
        quantity: payload.quantity,
        rating: payload.rating,
    };
    let product = state.engine.new_product(cmd).await?;
    Ok(Json(product_view(product)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> Result<Json<ProductView>, ServerError> {
    let update = engine::ProductUpdate {
        name: payload.name,
        category: payload.category,
        price: payload.price,
        description: payload.description,
        image_url: payload.image_url,
        in_stock: payload.in_stock,
        quantity: payload.quantity,
        rating: payload.rating,
    };
    let product = state.engine.update_product(&id, update).await?;
    Ok(Json(product_view(product)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_product(&id).await?;
    Ok(Json(Message {
        ok: true,
        message: "product deleted".to_string(),
    }))
}
