//! Store location API endpoints

use api_types::{
    Message,
    store::{StoreNew, StoreUpdate, StoreView},
};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, required, server::ServerState};

fn store_view(store: engine::Store) -> StoreView {
    StoreView {
        id: store.id,
        name: store.name,
        address: store.address,
        lat: store.lat,
        lng: store.lng,
        phone: store.phone,
        image: store.image,
        opening_hours: store.opening_hours,
        status: store.status.as_str().to_string(),
        description: store.description,
        rating: store.rating,
        created_at: store.created_at,
        updated_at: store.updated_at,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<StoreView>>, ServerError> {
    let stores = state.engine.list_stores().await?;
    Ok(Json(stores.into_iter().map(store_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<StoreView>, ServerError> {
    let store = state.engine.store(&id).await?;
    Ok(Json(store_view(store)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StoreNew>,
) -> Result<Json<StoreView>, ServerError> {
    let status = match payload.status.as_deref() {
        Some(status) => Some(engine::StoreStatus::try_from(status).map_err(ServerError::from)?),
        None => None,
    };

    let cmd = engine::StoreCmd {
        name: required(payload.name, "name")?,
        address: required(payload.address, "address")?,
        lat: required(payload.lat, "lat")?,
        lng: required(payload.lng, "lng")?,
        phone: payload.phone.unwrap_or_default(),
        image: payload.image,
        opening_hours: payload.opening_hours,
        status,
        description: payload.description,
        rating: payload.rating,
    };
    let store = state.engine.new_store(cmd).await?;
    Ok(Json(store_view(store)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StoreUpdate>,
) -> Result<Json<StoreView>, ServerError> {
    let status = match payload.status.as_deref() {
        Some(status) => Some(engine::StoreStatus::try_from(status).map_err(ServerError::from)?),
        None => None,
    };

    let update = engine::StoreUpdate {
        name: payload.name,
        address: payload.address,
        lat: payload.lat,
        lng: payload.lng,
        phone: payload.phone,
        image: payload.image,
        opening_hours: payload.opening_hours,
        status,
        description: payload.description,
        rating: payload.rating,
    };
    let store = state.engine.update_store(&id, update).await?;
    Ok(Json(store_view(store)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_store(&id).await?;
    Ok(Json(Message {
        ok: true,
        message: "store deleted".to_string(),
    }))
}
