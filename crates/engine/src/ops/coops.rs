use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{Coop, CoopUpdate, EngineError, ResultEngine, coops};

use super::{Engine, normalize_optional_text, with_tx};

impl Engine {
    /// List every coop, newest first.
    pub async fn list_coops(&self) -> ResultEngine<Vec<Coop>> {
        let models = coops::Entity::find()
            .order_by_desc(coops::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Coop::from).collect())
    }

    /// Return a single coop by id.
    pub async fn coop(&self, coop_id: &str) -> ResultEngine<Coop> {
        let coop = require_coop(&self.database, coop_id).await?;
        Ok(coop)
    }

    /// Create a new coop. The name must follow the barn naming scheme and be
    /// unique (case-insensitive).
    pub async fn new_coop(
        &self,
        name: &str,
        location: Option<&str>,
        notes: Option<&str>,
    ) -> ResultEngine<Coop> {
        let name = Coop::validate_name(name)?;

        let coop = Coop::new(
            name.clone(),
            normalize_optional_text(location).unwrap_or_default(),
            normalize_optional_text(notes).unwrap_or_default(),
        );
        let entry: coops::ActiveModel = (&coop).into();

        with_tx!(self, |db_tx| {
            ensure_name_free(&db_tx, &name, None).await?;
            entry.insert(&db_tx).await?;
            Ok(coop)
        })
    }

    /// Update a coop's descriptive fields. Counters are never writable here;
    /// they only move through the ledger.
    pub async fn update_coop(&self, coop_id: &str, update: CoopUpdate) -> ResultEngine<Coop> {
        with_tx!(self, |db_tx| {
            let mut coop = require_coop(&db_tx, coop_id).await?;

            if let Some(name) = update.name.as_deref() {
                let name = Coop::validate_name(name)?;
                if !name.eq_ignore_ascii_case(&coop.name) {
                    ensure_name_free(&db_tx, &name, Some(coop_id)).await?;
                }
                coop.name = name;
            }
            if let Some(location) = update.location {
                coop.location = location.trim().to_string();
            }
            if let Some(notes) = update.notes {
                coop.notes = notes.trim().to_string();
            }
            coop.updated_at = chrono::Utc::now();

            let entry = coops::ActiveModel {
                id: ActiveValue::Set(coop.id.clone()),
                name: ActiveValue::Set(coop.name.clone()),
                location: ActiveValue::Set(coop.location.clone()),
                notes: ActiveValue::Set(coop.notes.clone()),
                updated_at: ActiveValue::Set(coop.updated_at),
                ..Default::default()
            };
            entry.update(&db_tx).await?;
            Ok(coop)
        })
    }

    /// Delete a coop and return its last snapshot. Transactions and feeds
    /// referencing it are left in place; their own deletion tolerates the
    /// missing coop.
    pub async fn delete_coop(&self, coop_id: &str) -> ResultEngine<Coop> {
        with_tx!(self, |db_tx| {
            let coop = require_coop(&db_tx, coop_id).await?;
            coops::Entity::delete_by_id(coop_id).exec(&db_tx).await?;
            Ok(coop)
        })
    }
}

/// Load a coop or fail with `NotFound("coop")`.
pub(crate) async fn require_coop<C: ConnectionTrait>(db: &C, coop_id: &str) -> ResultEngine<Coop> {
    let model = coops::Entity::find_by_id(coop_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound("coop".to_string()))?;
    Ok(Coop::from(model))
}

/// Persist the denormalized counters of a coop after a ledger mutation.
pub(crate) async fn persist_coop_counters<C: ConnectionTrait>(
    db: &C,
    coop: &Coop,
) -> ResultEngine<()> {
    let entry = coops::ActiveModel {
        id: ActiveValue::Set(coop.id.clone()),
        chickens: ActiveValue::Set(coop.chickens),
        total_chicken_cost: ActiveValue::Set(coop.total_chicken_cost),
        total_feed_cost: ActiveValue::Set(coop.total_feed_cost),
        total_revenue: ActiveValue::Set(coop.total_revenue),
        updated_at: ActiveValue::Set(coop.updated_at),
        ..Default::default()
    };
    entry.update(db).await?;
    Ok(())
}

async fn ensure_name_free<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_id: Option<&str>,
) -> ResultEngine<()> {
    let mut query =
        coops::Entity::find().filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()));
    if let Some(id) = exclude_id {
        query = query.filter(coops::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(EngineError::DuplicateName(name.to_string()));
    }
    Ok(())
}
