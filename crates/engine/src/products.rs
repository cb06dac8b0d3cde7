//! Products offered by the farm shop. Plain catalog data with shallow
//! required-field validation; nothing here touches the ledger.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::commands::ProductCmd;

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub description: String,
    pub image_url: String,
    pub in_stock: bool,
    pub quantity: i64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub(crate) fn new(cmd: ProductCmd) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: cmd.name,
            category: cmd.category.unwrap_or_else(|| "khac".to_string()),
            price: cmd.price,
            description: cmd.description,
            image_url: cmd.image_url.unwrap_or_default(),
            in_stock: cmd.in_stock.unwrap_or(true),
            quantity: cmd.quantity.unwrap_or(0),
            rating: cmd.rating.unwrap_or(5.0),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub description: String,
    pub image_url: String,
    pub in_stock: bool,
    pub quantity: i64,
    pub rating: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        Self {
            id: ActiveValue::Set(product.id.clone()),
            name: ActiveValue::Set(product.name.clone()),
            category: ActiveValue::Set(product.category.clone()),
            price: ActiveValue::Set(product.price),
            description: ActiveValue::Set(product.description.clone()),
            image_url: ActiveValue::Set(product.image_url.clone()),
            in_stock: ActiveValue::Set(product.in_stock),
            quantity: ActiveValue::Set(product.quantity),
            rating: ActiveValue::Set(product.rating),
            created_at: ActiveValue::Set(product.created_at),
            updated_at: ActiveValue::Set(product.updated_at),
        }
    }
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            price: model.price,
            description: model.description,
            image_url: model.image_url,
            in_stock: model.in_stock,
            quantity: model.quantity,
            rating: model.rating,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
