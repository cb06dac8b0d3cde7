//! Feed/vaccine/vitamin applications.
//!
//! A `Feed` record optionally attributes its total cost to a coop. The
//! lifecycle mirrors chicken transactions: create and delete only, with the
//! coop's `total_feed_cost` adjusted on both sides. The `total_cost` value is
//! trusted from the caller and not recomputed from the ingredient lines.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, commands::FeedCmd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Vaccine,
    Vitamin,
    #[default]
    Compound,
}

impl FeedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vaccine => "vaccine",
            Self::Vitamin => "vitamin",
            Self::Compound => "compound",
        }
    }
}

impl TryFrom<&str> for FeedKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "vaccine" => Ok(Self::Vaccine),
            "vitamin" => Ok(Self::Vitamin),
            "compound" => Ok(Self::Compound),
            other => Err(EngineError::InvalidType(format!(
                "invalid feed type: {other}"
            ))),
        }
    }
}

/// One ingredient line of a feed application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit_price: i64,
    pub total_price: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feed {
    pub id: String,
    pub name: String,
    pub kind: FeedKind,
    pub coop_id: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub total_cost: i64,
    pub created_at: DateTime<Utc>,
}

impl Feed {
    pub(crate) fn new(name: String, cmd: FeedCmd) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            kind: cmd.kind,
            coop_id: cmd.coop_id,
            ingredients: cmd.ingredients,
            total_cost: cmd.total_cost,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "feeds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub kind: String,
    pub coop_id: Option<String>,
    /// Ingredient lines serialized as JSON.
    pub ingredients: String,
    pub total_cost: i64,
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

impl From<&Feed> for ActiveModel {
    fn from(feed: &Feed) -> Self {
        Self {
            id: ActiveValue::Set(feed.id.clone()),
            name: ActiveValue::Set(feed.name.clone()),
            kind: ActiveValue::Set(feed.kind.as_str().to_string()),
            coop_id: ActiveValue::Set(feed.coop_id.clone()),
            ingredients: ActiveValue::Set(
                serde_json::to_string(&feed.ingredients).unwrap_or_else(|_| "[]".to_string()),
            ),
            total_cost: ActiveValue::Set(feed.total_cost),
            created_at: ActiveValue::Set(feed.created_at),
        }
    }
}

impl TryFrom<Model> for Feed {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            kind: FeedKind::try_from(model.kind.as_str())?,
            coop_id: model.coop_id,
            ingredients: serde_json::from_str(&model.ingredients).unwrap_or_default(),
            total_cost: model.total_cost,
            created_at: model.created_at,
        })
    }
}
