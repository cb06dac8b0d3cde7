//! Chicken transaction API endpoints

use api_types::chicken::{
    TransactionCreated, TransactionDeleted, TransactionKind, TransactionListQuery, TransactionNew,
    TransactionView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{ServerError, coops::coop_view, required, server::ServerState};

fn transaction_view(tx: engine::ChickenTransaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        coop_id: tx.coop_id,
        kind: match tx.kind {
            engine::TransactionKind::In => TransactionKind::In,
            engine::TransactionKind::Out => TransactionKind::Out,
        },
        quantity: tx.quantity,
        reason: tx.reason,
        breed: tx.breed,
        note: tx.note,
        start_date: tx.start_date,
        chick_price: tx.chick_price,
        supplier: tx.supplier,
        sale_price: tx.sale_price,
        created_at: tx.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let limit = query.limit.unwrap_or(200);
    let transactions = state
        .engine
        .list_chicken_transactions(Some(limit))
        .await?;
    Ok(Json(
        transactions.into_iter().map(transaction_view).collect(),
    ))
}

pub async fn list_for_coop(
    State(state): State<ServerState>,
    Path(coop_id): Path<String>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let limit = query.limit.unwrap_or(100);
    let transactions = state
        .engine
        .list_chicken_transactions_for_coop(&coop_id, Some(limit))
        .await?;
    Ok(Json(
        transactions.into_iter().map(transaction_view).collect(),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.chicken_transaction(&id).await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let coop_id = required(payload.coop_id, "coopId")?;
    let kind = required(payload.kind, "type")?;
    let kind = engine::TransactionKind::try_from(kind.as_str()).map_err(ServerError::from)?;
    let quantity = required(payload.quantity, "quantity")?;

    let mut cmd = engine::ChickenTransactionCmd::new(coop_id, kind, quantity);
    if let Some(reason) = payload.reason {
        cmd = cmd.reason(reason);
    }
    if let Some(breed) = payload.breed {
        cmd = cmd.breed(breed);
    }
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }
    if let Some(start_date) = payload.start_date {
        cmd = cmd.start_date(start_date);
    }
    if let Some(chick_price) = payload.chick_price {
        cmd = cmd.chick_price(chick_price);
    }
    if let Some(supplier) = payload.supplier {
        cmd = cmd.supplier(supplier);
    }
    if let Some(sale_price) = payload.sale_price {
        cmd = cmd.sale_price(sale_price);
    }

    let (coop, tx) = state.engine.new_chicken_transaction(&cmd).await?;
    Ok(Json(TransactionCreated {
        ok: true,
        coop: coop_view(coop),
        tx: transaction_view(tx),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionDeleted>, ServerError> {
    let coop = state.engine.delete_chicken_transaction(&id).await?;
    Ok(Json(TransactionDeleted {
        ok: true,
        message: "transaction deleted".to_string(),
        coop: coop.map(coop_view),
    }))
}
