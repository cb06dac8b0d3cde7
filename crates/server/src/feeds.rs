//! Feed API endpoints

use api_types::{
    Message,
    feed::{FeedListQuery, FeedNew, FeedView, Ingredient},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, required, server::ServerState};

fn feed_view(feed: engine::Feed) -> FeedView {
    FeedView {
        id: feed.id,
        name: feed.name,
        kind: feed.kind.as_str().to_string(),
        coop_id: feed.coop_id,
        ingredients: feed
            .ingredients
            .into_iter()
            .map(|line| Ingredient {
                name: line.name,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: line.total_price,
            })
            .collect(),
        total_cost: feed.total_cost,
        created_at: feed.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<FeedListQuery>,
) -> Result<Json<Vec<FeedView>>, ServerError> {
    let feeds = state.engine.list_feeds(query.coop_id.as_deref()).await?;
    Ok(Json(feeds.into_iter().map(feed_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<FeedView>, ServerError> {
    let feed = state.engine.feed(&id).await?;
    Ok(Json(feed_view(feed)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FeedNew>,
) -> Result<Json<FeedView>, ServerError> {
    let name = required(payload.name, "name")?;
    let kind = match payload.kind.as_deref() {
        Some(kind) => engine::FeedKind::try_from(kind).map_err(ServerError::from)?,
        None => engine::FeedKind::default(),
    };
    let ingredients = payload
        .ingredients
        .unwrap_or_default()
        .into_iter()
        .map(|line| engine::Ingredient {
            name: line.name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
        })
        .collect();

    let cmd = engine::FeedCmd {
        name,
        kind,
        coop_id: payload.coop_id,
        ingredients,
        total_cost: payload.total_cost.unwrap_or(0),
    };
    let feed = state.engine.new_feed(cmd).await?;
    Ok(Json(feed_view(feed)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_feed(&id).await?;
    Ok(Json(Message {
        ok: true,
        message: "feed deleted".to_string(),
    }))
}
