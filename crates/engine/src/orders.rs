//! Customer orders.
//!
//! Orders carry the only real state machine in the system. The original
//! client enforced transitions by which button it rendered; here the engine
//! validates them, so an order can never jump from `delivered` back to
//! `confirmed` no matter what the client sends.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, commands::OrderCmd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether `self -> next` is a legal transition.
    ///
    /// `pending -> confirmed -> shipping -> delivered`, any non-terminal
    /// state may be cancelled, and restating the current status is a no-op.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Shipping)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Shipping, Self::Delivered)
                | (Self::Shipping, Self::Cancelled)
        )
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipping" => Ok(Self::Shipping),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidType(format!(
                "invalid order status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    BankTransfer,
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Card => "card",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cash" => Ok(Self::Cash),
            "bank_transfer" => Ok(Self::BankTransfer),
            "card" => Ok(Self::Card),
            other => Err(EngineError::InvalidType(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// One line of an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: i64,
    pub price: i64,
    pub subtotal: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn new(order_number: String, cmd: OrderCmd) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            order_number,
            customer_name: cmd.customer_name,
            customer_phone: cmd.customer_phone,
            customer_address: cmd.customer_address,
            store_id: cmd.store_id,
            store_name: cmd.store_name,
            items: cmd.items,
            total_amount: cmd.total_amount,
            status: OrderStatus::Pending,
            payment_method: cmd.payment_method.unwrap_or_default(),
            notes: cmd.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    /// Order lines serialized as JSON.
    pub items: String,
    pub total_amount: i64,
    pub status: String,
    pub payment_method: String,
    pub notes: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Order> for ActiveModel {
    fn from(order: &Order) -> Self {
        Self {
            id: ActiveValue::Set(order.id.clone()),
            order_number: ActiveValue::Set(order.order_number.clone()),
            customer_name: ActiveValue::Set(order.customer_name.clone()),
            customer_phone: ActiveValue::Set(order.customer_phone.clone()),
            customer_address: ActiveValue::Set(order.customer_address.clone()),
            store_id: ActiveValue::Set(order.store_id.clone()),
            store_name: ActiveValue::Set(order.store_name.clone()),
            items: ActiveValue::Set(
                serde_json::to_string(&order.items).unwrap_or_else(|_| "[]".to_string()),
            ),
            total_amount: ActiveValue::Set(order.total_amount),
            status: ActiveValue::Set(order.status.as_str().to_string()),
            payment_method: ActiveValue::Set(order.payment_method.as_str().to_string()),
            notes: ActiveValue::Set(order.notes.clone()),
            created_at: ActiveValue::Set(order.created_at),
            updated_at: ActiveValue::Set(order.updated_at),
        }
    }
}

impl TryFrom<Model> for Order {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            order_number: model.order_number,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            customer_address: model.customer_address,
            store_id: model.store_id,
            store_name: model.store_name,
            items: serde_json::from_str(&model.items).unwrap_or_default(),
            total_amount: model.total_amount,
            status: OrderStatus::try_from(model.status.as_str())?,
            payment_method: PaymentMethod::try_from(model.payment_method.as_str())?,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
