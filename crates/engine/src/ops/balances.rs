use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    ChickenTransaction, Coop, ResultEngine, TransactionKind, chicken_transactions, feeds,
};

use super::{
    Engine,
    coops::{persist_coop_counters, require_coop},
    with_tx,
};

impl Engine {
    /// Rebuild a coop's denormalized counters from its logs.
    ///
    /// Replays every chicken transaction in chronological order and sums the
    /// attributed feed costs, then persists the result. This is the repair
    /// tool for counters that drifted (e.g. after clamped reversals).
    pub async fn recompute_coop_totals(&self, coop_id: &str) -> ResultEngine<Coop> {
        with_tx!(self, |db_tx| {
            let mut coop = require_coop(&db_tx, coop_id).await?;

            let transaction_models = chicken_transactions::Entity::find()
                .filter(chicken_transactions::Column::CoopId.eq(coop_id))
                .order_by_asc(chicken_transactions::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut chickens: i64 = 0;
            let mut total_chicken_cost: i64 = 0;
            let mut total_revenue: i64 = 0;
            for model in transaction_models {
                let transaction = ChickenTransaction::try_from(model)?;
                match transaction.kind {
                    TransactionKind::In => {
                        chickens += transaction.quantity;
                        if transaction.chick_price > 0 {
                            total_chicken_cost += transaction.chick_price * transaction.quantity;
                        }
                    }
                    TransactionKind::Out => {
                        chickens -= transaction.quantity;
                        if transaction.sale_price > 0 {
                            total_revenue += transaction.sale_price * transaction.quantity;
                        }
                    }
                }
            }

            let feed_models = feeds::Entity::find()
                .filter(feeds::Column::CoopId.eq(coop_id))
                .all(&db_tx)
                .await?;
            let total_feed_cost: i64 = feed_models.iter().map(|m| m.total_cost).sum();

            coop.chickens = chickens.max(0);
            coop.total_chicken_cost = total_chicken_cost.max(0);
            coop.total_feed_cost = total_feed_cost.max(0);
            coop.total_revenue = total_revenue.max(0);
            coop.updated_at = chrono::Utc::now();

            persist_coop_counters(&db_tx, &coop).await?;
            Ok(coop)
        })
    }
}
