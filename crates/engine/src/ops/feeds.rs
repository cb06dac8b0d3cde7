use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Feed, FeedCmd, ResultEngine, feeds};

use super::{
    Engine,
    coops::{persist_coop_counters, require_coop},
    normalize_required, with_tx,
};

impl Engine {
    /// Record a feed application. When it targets a coop its cost is added to
    /// the coop's feed total in the same DB transaction.
    pub async fn new_feed(&self, cmd: FeedCmd) -> ResultEngine<Feed> {
        let name = normalize_required(&cmd.name, "name")?;
        if cmd.total_cost < 0 {
            return Err(EngineError::InvalidQuantity(
                "total cost must not be negative".to_string(),
            ));
        }

        let feed = Feed::new(name, cmd);
        let entry: feeds::ActiveModel = (&feed).into();

        with_tx!(self, |db_tx| {
            if let Some(coop_id) = feed.coop_id.as_deref() {
                // A dangling coop id is tolerated: the feed is still recorded,
                // it just attributes cost to nothing.
                match require_coop(&db_tx, coop_id).await {
                    Ok(mut coop) => {
                        coop.apply_feed_cost(feed.total_cost);
                        coop.updated_at = chrono::Utc::now();
                        persist_coop_counters(&db_tx, &coop).await?;
                    }
                    Err(EngineError::NotFound(_)) => {}
                    Err(err) => return Err(err),
                }
            }
            entry.insert(&db_tx).await?;
            Ok(feed)
        })
    }

    /// Delete a feed record, reversing its cost on the parent coop when the
    /// coop still exists.
    pub async fn delete_feed(&self, feed_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = feeds::Entity::find_by_id(feed_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("feed".to_string()))?;
            let feed = Feed::try_from(model)?;

            if let Some(coop_id) = feed.coop_id.as_deref() {
                match require_coop(&db_tx, coop_id).await {
                    Ok(mut coop) => {
                        coop.revert_feed_cost(feed.total_cost);
                        coop.updated_at = chrono::Utc::now();
                        persist_coop_counters(&db_tx, &coop).await?;
                    }
                    Err(EngineError::NotFound(_)) => {}
                    Err(err) => return Err(err),
                }
            }

            feeds::Entity::delete_by_id(feed_id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Return a single feed record by id.
    pub async fn feed(&self, feed_id: &str) -> ResultEngine<Feed> {
        let model = feeds::Entity::find_by_id(feed_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("feed".to_string()))?;
        Feed::try_from(model)
    }

    /// List feed records, optionally scoped to one coop, newest first.
    pub async fn list_feeds(&self, coop_id: Option<&str>) -> ResultEngine<Vec<Feed>> {
        let mut query = feeds::Entity::find().order_by_desc(feeds::Column::CreatedAt);
        if let Some(coop_id) = coop_id {
            query = query.filter(feeds::Column::CoopId.eq(coop_id));
        }
        let models = query.all(&self.database).await?;
        models.into_iter().map(Feed::try_from).collect()
    }
}
