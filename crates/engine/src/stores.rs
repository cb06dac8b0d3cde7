//! Physical store locations of the farm's retail chain.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, commands::StoreCmd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    #[default]
    Active,
    Closed,
    TemporarilyClosed,
}

impl StoreStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::TemporarilyClosed => "temporarily_closed",
        }
    }
}

impl TryFrom<&str> for StoreStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            "temporarily_closed" => Ok(Self::TemporarilyClosed),
            other => Err(EngineError::InvalidType(format!(
                "invalid store status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: String,
    pub image: String,
    pub opening_hours: String,
    pub status: StoreStatus,
    pub description: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub(crate) fn new(cmd: StoreCmd) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: cmd.name,
            address: cmd.address,
            lat: cmd.lat,
            lng: cmd.lng,
            phone: cmd.phone,
            image: cmd.image.unwrap_or_default(),
            opening_hours: cmd
                .opening_hours
                .unwrap_or_else(|| "08:00 - 22:00".to_string()),
            status: cmd.status.unwrap_or_default(),
            description: cmd.description.unwrap_or_default(),
            rating: cmd.rating.unwrap_or(5.0),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: String,
    pub image: String,
    pub opening_hours: String,
    pub status: String,
    pub description: String,
    pub rating: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Store> for ActiveModel {
    fn from(store: &Store) -> Self {
        Self {
            id: ActiveValue::Set(store.id.clone()),
            name: ActiveValue::Set(store.name.clone()),
            address: ActiveValue::Set(store.address.clone()),
            lat: ActiveValue::Set(store.lat),
            lng: ActiveValue::Set(store.lng),
            phone: ActiveValue::Set(store.phone.clone()),
            image: ActiveValue::Set(store.image.clone()),
            opening_hours: ActiveValue::Set(store.opening_hours.clone()),
            status: ActiveValue::Set(store.status.as_str().to_string()),
            description: ActiveValue::Set(store.description.clone()),
            rating: ActiveValue::Set(store.rating),
            created_at: ActiveValue::Set(store.created_at),
            updated_at: ActiveValue::Set(store.updated_at),
        }
    }
}

impl TryFrom<Model> for Store {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            address: model.address,
            lat: model.lat,
            lng: model.lng,
            phone: model.phone,
            image: model.image,
            opening_hours: model.opening_hours,
            status: StoreStatus::try_from(model.status.as_str())?,
            description: model.description,
            rating: model.rating,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
