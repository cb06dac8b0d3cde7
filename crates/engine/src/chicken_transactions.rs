//! Chicken import/export events.
//!
//! A `ChickenTransaction` is an immutable ledger entry: it is created once
//! and only ever deleted, in which case its effect on the owning coop is
//! reversed. The stored quantity/price fields are exactly what the reversal
//! needs to undo.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, commands::ChickenTransactionCmd};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    In,
    Out,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(EngineError::InvalidType(
                "type must be 'IN' or 'OUT'".to_string(),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChickenTransaction {
    pub id: String,
    pub coop_id: String,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub reason: String,
    pub breed: String,
    pub note: String,
    pub start_date: String,
    pub chick_price: i64,
    pub supplier: String,
    pub sale_price: i64,
    pub created_at: DateTime<Utc>,
}

impl ChickenTransaction {
    pub(crate) fn new(cmd: &ChickenTransactionCmd) -> ResultEngine<Self> {
        if cmd.quantity <= 0 {
            return Err(EngineError::InvalidQuantity(
                "quantity must be greater than 0".to_string(),
            ));
        }
        if cmd.chick_price < 0 || cmd.sale_price < 0 {
            return Err(EngineError::InvalidQuantity(
                "price must not be negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            coop_id: cmd.coop_id.clone(),
            kind: cmd.kind,
            // Stored as an absolute value regardless of direction.
            quantity: cmd.quantity.abs(),
            reason: cmd.reason.clone(),
            breed: cmd.breed.clone(),
            note: cmd.note.clone(),
            start_date: cmd.start_date.clone(),
            chick_price: cmd.chick_price,
            supplier: cmd.supplier.clone(),
            sale_price: cmd.sale_price,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "chicken_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub coop_id: String,
    pub kind: String,
    pub quantity: i64,
    pub reason: String,
    pub breed: String,
    pub note: String,
    pub start_date: String,
    pub chick_price: i64,
    pub supplier: String,
    pub sale_price: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coops::Entity",
        from = "Column::CoopId",
        to = "super::coops::Column::Id"
    )]
    Coops,
}

impl Related<super::coops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ChickenTransaction> for ActiveModel {
    fn from(tx: &ChickenTransaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.clone()),
            coop_id: ActiveValue::Set(tx.coop_id.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            quantity: ActiveValue::Set(tx.quantity),
            reason: ActiveValue::Set(tx.reason.clone()),
            breed: ActiveValue::Set(tx.breed.clone()),
            note: ActiveValue::Set(tx.note.clone()),
            start_date: ActiveValue::Set(tx.start_date.clone()),
            chick_price: ActiveValue::Set(tx.chick_price),
            supplier: ActiveValue::Set(tx.supplier.clone()),
            sale_price: ActiveValue::Set(tx.sale_price),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for ChickenTransaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            coop_id: model.coop_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            quantity: model.quantity,
            reason: model.reason,
            breed: model.breed,
            note: model.note,
            start_date: model.start_date,
            chick_price: model.chick_price,
            supplier: model.supplier,
            sale_price: model.sale_price,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips() {
        assert_eq!(TransactionKind::try_from("IN").unwrap(), TransactionKind::In);
        assert_eq!(
            TransactionKind::try_from("OUT").unwrap(),
            TransactionKind::Out
        );
        assert!(TransactionKind::try_from("in").is_err());
        assert!(TransactionKind::try_from("TRANSFER").is_err());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let cmd = ChickenTransactionCmd::new("coop".to_string(), TransactionKind::In, 0);
        assert_eq!(
            ChickenTransaction::new(&cmd).unwrap_err(),
            EngineError::InvalidQuantity("quantity must be greater than 0".to_string())
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let cmd =
            ChickenTransactionCmd::new("coop".to_string(), TransactionKind::In, 5).chick_price(-1);
        assert!(ChickenTransaction::new(&cmd).is_err());
    }
}
