use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::{
    ChickenTransaction, ChickenTransactionCmd, Coop, EngineError, ResultEngine,
    chicken_transactions,
};

use super::{
    Engine,
    coops::{persist_coop_counters, require_coop},
    with_tx,
};

impl Engine {
    /// Record a chicken movement and fold it into the parent coop's counters.
    /// Both writes share one DB transaction so the log and the counters cannot
    /// drift apart.
    pub async fn new_chicken_transaction(
        &self,
        cmd: &ChickenTransactionCmd,
    ) -> ResultEngine<(Coop, ChickenTransaction)> {
        let transaction = ChickenTransaction::new(cmd)?;
        let entry: chicken_transactions::ActiveModel = (&transaction).into();

        with_tx!(self, |db_tx| {
            let mut coop = require_coop(&db_tx, &transaction.coop_id).await?;
            coop.apply_chicken_transaction(&transaction)?;
            coop.updated_at = chrono::Utc::now();
            persist_coop_counters(&db_tx, &coop).await?;
            entry.insert(&db_tx).await?;
            Ok((coop, transaction))
        })
    }

    /// Delete a chicken transaction, reversing its effect on the parent coop.
    /// If the coop is already gone the row is removed without reversal.
    pub async fn delete_chicken_transaction(
        &self,
        transaction_id: &str,
    ) -> ResultEngine<Option<Coop>> {
        with_tx!(self, |db_tx| {
            let model = chicken_transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("transaction".to_string()))?;
            let transaction = ChickenTransaction::try_from(model)?;

            let coop = match require_coop(&db_tx, &transaction.coop_id).await {
                Ok(mut coop) => {
                    coop.revert_chicken_transaction(&transaction);
                    coop.updated_at = chrono::Utc::now();
                    persist_coop_counters(&db_tx, &coop).await?;
                    Some(coop)
                }
                Err(EngineError::NotFound(_)) => None,
                Err(err) => return Err(err),
            };

            chicken_transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;
            Ok(coop)
        })
    }

    /// Return a single chicken transaction by id.
    pub async fn chicken_transaction(
        &self,
        transaction_id: &str,
    ) -> ResultEngine<ChickenTransaction> {
        let model = chicken_transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("transaction".to_string()))?;
        ChickenTransaction::try_from(model)
    }

    /// List chicken transactions across all coops, newest first.
    pub async fn list_chicken_transactions(
        &self,
        limit: Option<u64>,
    ) -> ResultEngine<Vec<ChickenTransaction>> {
        let mut query = chicken_transactions::Entity::find()
            .order_by_desc(chicken_transactions::Column::CreatedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query.all(&self.database).await?;
        models.into_iter().map(ChickenTransaction::try_from).collect()
    }

    /// List chicken transactions for one coop, newest first.
    pub async fn list_chicken_transactions_for_coop(
        &self,
        coop_id: &str,
        limit: Option<u64>,
    ) -> ResultEngine<Vec<ChickenTransaction>> {
        let mut query = chicken_transactions::Entity::find()
            .filter(chicken_transactions::Column::CoopId.eq(coop_id))
            .order_by_desc(chicken_transactions::Column::CreatedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query.all(&self.database).await?;
        models.into_iter().map(ChickenTransaction::try_from).collect()
    }
}
