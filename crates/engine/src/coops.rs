//! The `Coop` is a physical chicken enclosure together with its running
//! aggregate counters: live bird count, accumulated purchase cost, feed cost
//! and sale revenue. The counters must always equal the sum of the effects of
//! all non-deleted transactions referencing the coop.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{
    ResultEngine,
    chicken_transactions::{ChickenTransaction, TransactionKind},
    error::EngineError,
};

/// A chicken enclosure and its ledger counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coop {
    pub id: String,
    pub name: String,
    pub chickens: i64,
    pub location: String,
    pub notes: String,
    pub total_chicken_cost: i64,
    pub total_feed_cost: i64,
    pub total_revenue: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coop {
    pub fn new(name: String, location: String, notes: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            chickens: 0,
            location,
            notes,
            total_chicken_cost: 0,
            total_feed_cost: 0,
            total_revenue: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate and normalize a coop name.
    ///
    /// Accepted names are "Chuồng" (leading letter case-insensitive) followed
    /// by whitespace and one or more digits, e.g. "Chuồng 1" or "chuồng 12".
    pub fn validate_name(raw: &str) -> ResultEngine<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(EngineError::MissingField("name".to_string()));
        }
        if !is_valid_name(name) {
            return Err(EngineError::InvalidName(
                "coop name must follow the \"Chuồng N\" format".to_string(),
            ));
        }
        Ok(name.to_string())
    }

    /// Apply a chicken transaction to the counters.
    ///
    /// Fails without mutating anything when an export would drive the bird
    /// count negative.
    pub(crate) fn apply_chicken_transaction(
        &mut self,
        tx: &ChickenTransaction,
    ) -> ResultEngine<()> {
        let delta = match tx.kind {
            TransactionKind::In => tx.quantity,
            TransactionKind::Out => -tx.quantity,
        };
        let new_count = self.chickens + delta;
        if new_count < 0 {
            return Err(EngineError::InvalidOperation(
                "cannot export more chickens than available".to_string(),
            ));
        }

        self.chickens = new_count;
        match tx.kind {
            TransactionKind::In if tx.chick_price > 0 => {
                self.total_chicken_cost += tx.chick_price * tx.quantity;
            }
            TransactionKind::Out if tx.sale_price > 0 => {
                self.total_revenue += tx.sale_price * tx.quantity;
            }
            _ => {}
        }
        Ok(())
    }

    /// Reverse the effect of a chicken transaction.
    ///
    /// Counters are clamped at zero instead of failing: reversal never
    /// produces negative aggregates even when prior state was already
    /// inconsistent.
    pub(crate) fn revert_chicken_transaction(&mut self, tx: &ChickenTransaction) {
        match tx.kind {
            TransactionKind::In => {
                self.chickens = (self.chickens - tx.quantity).max(0);
                if tx.chick_price > 0 {
                    self.total_chicken_cost =
                        (self.total_chicken_cost - tx.chick_price * tx.quantity).max(0);
                }
            }
            TransactionKind::Out => {
                self.chickens += tx.quantity;
                if tx.sale_price > 0 {
                    self.total_revenue = (self.total_revenue - tx.sale_price * tx.quantity).max(0);
                }
            }
        }
    }

    pub(crate) fn apply_feed_cost(&mut self, total_cost: i64) {
        self.total_feed_cost += total_cost;
    }

    pub(crate) fn revert_feed_cost(&mut self, total_cost: i64) {
        self.total_feed_cost = (self.total_feed_cost - total_cost).max(0);
    }
}

fn is_valid_name(name: &str) -> bool {
    let rest = match name
        .strip_prefix("Chuồng")
        .or_else(|| name.strip_prefix("chuồng"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let digits = rest.trim_start();
    // At least one whitespace must separate the word from the number.
    if digits.len() == rest.len() {
        return false;
    }
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "coops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub chickens: i64,
    pub location: String,
    pub notes: String,
    pub total_chicken_cost: i64,
    pub total_feed_cost: i64,
    pub total_revenue: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chicken_transactions::Entity")]
    ChickenTransactions,
    #[sea_orm(has_many = "super::feeds::Entity")]
    Feeds,
}

impl Related<super::chicken_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChickenTransactions.def()
    }
}

impl Related<super::feeds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feeds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Coop> for ActiveModel {
    fn from(coop: &Coop) -> Self {
        Self {
            id: ActiveValue::Set(coop.id.clone()),
            name: ActiveValue::Set(coop.name.clone()),
            chickens: ActiveValue::Set(coop.chickens),
            location: ActiveValue::Set(coop.location.clone()),
            notes: ActiveValue::Set(coop.notes.clone()),
            total_chicken_cost: ActiveValue::Set(coop.total_chicken_cost),
            total_feed_cost: ActiveValue::Set(coop.total_feed_cost),
            total_revenue: ActiveValue::Set(coop.total_revenue),
            created_at: ActiveValue::Set(coop.created_at),
            updated_at: ActiveValue::Set(coop.updated_at),
        }
    }
}

impl From<Model> for Coop {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            chickens: model.chickens,
            location: model.location,
            notes: model.notes,
            total_chicken_cost: model.total_chicken_cost,
            total_feed_cost: model.total_feed_cost,
            total_revenue: model.total_revenue,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
