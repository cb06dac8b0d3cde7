//! Coop API endpoints

use api_types::{
    Message,
    coop::{CoopNew, CoopUpdate, CoopView},
};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, required, server::ServerState};

pub(crate) fn coop_view(coop: engine::Coop) -> CoopView {
    CoopView {
        id: coop.id,
        name: coop.name,
        chickens: coop.chickens,
        location: coop.location,
        notes: coop.notes,
        total_chicken_cost: coop.total_chicken_cost,
        total_feed_cost: coop.total_feed_cost,
        total_revenue: coop.total_revenue,
        created_at: coop.created_at,
        updated_at: coop.updated_at,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CoopView>>, ServerError> {
    let coops = state.engine.list_coops().await?;
    Ok(Json(coops.into_iter().map(coop_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CoopView>, ServerError> {
    let coop = state.engine.coop(&id).await?;
    Ok(Json(coop_view(coop)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CoopNew>,
) -> Result<Json<CoopView>, ServerError> {
    let name = required(payload.name, "name")?;
    let coop = state
        .engine
        .new_coop(&name, payload.location.as_deref(), payload.notes.as_deref())
        .await?;
    Ok(Json(coop_view(coop)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CoopUpdate>,
) -> Result<Json<CoopView>, ServerError> {
    let update = engine::CoopUpdate {
        name: payload.name,
        location: payload.location,
        notes: payload.notes,
    };
    let coop = state.engine.update_coop(&id, update).await?;
    Ok(Json(coop_view(coop)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_coop(&id).await?;
    Ok(Json(Message {
        ok: true,
        message: "coop deleted".to_string(),
    }))
}

pub async fn recompute(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CoopView>, ServerError> {
    let coop = state.engine.recompute_coop_totals(&id).await?;
    Ok(Json(coop_view(coop)))
}
