//! Wire types shared between the server and its clients.
//!
//! All JSON field names are camelCase. Request bodies keep most fields
//! optional so the server can report a precise missing-field error instead of
//! a generic deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod coop {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CoopNew {
        pub name: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CoopUpdate {
        pub name: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CoopView {
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
}

pub mod chicken {
    use super::*;

    /// "IN" adds birds to a coop, "OUT" removes them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionKind {
        In,
        Out,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        pub coop_id: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub quantity: Option<i64>,
        pub reason: Option<String>,
        pub breed: Option<String>,
        pub note: Option<String>,
        pub start_date: Option<String>,
        pub chick_price: Option<i64>,
        pub supplier: Option<String>,
        pub sale_price: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: String,
        pub coop_id: String,
        #[serde(rename = "type")]
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

    /// Create response: the stored transaction plus the coop counters it
    /// moved, taken from the same DB transaction.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionCreated {
        pub ok: bool,
        pub coop: super::coop::CoopView,
        pub tx: TransactionView,
    }

    /// Delete response. `coop` is absent when the parent coop no longer
    /// existed and no reversal happened.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionDeleted {
        pub ok: bool,
        pub message: String,
        pub coop: Option<super::coop::CoopView>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListQuery {
        pub limit: Option<u64>,
    }
}

pub mod feed {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Ingredient {
        pub name: String,
        pub quantity: f64,
        pub unit_price: i64,
        pub total_price: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FeedNew {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub coop_id: Option<String>,
        pub ingredients: Option<Vec<Ingredient>>,
        pub total_cost: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FeedView {
        pub id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub coop_id: Option<String>,
        pub ingredients: Vec<Ingredient>,
        pub total_cost: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FeedListQuery {
        pub coop_id: Option<String>,
    }
}

pub mod product {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNew {
        pub name: Option<String>,
        pub category: Option<String>,
        pub price: Option<i64>,
        pub description: Option<String>,
        pub image_url: Option<String>,
        pub in_stock: Option<bool>,
        pub quantity: Option<i64>,
        pub rating: Option<f64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductUpdate {
        pub name: Option<String>,
        pub category: Option<String>,
        pub price: Option<i64>,
        pub description: Option<String>,
        pub image_url: Option<String>,
        pub in_stock: Option<bool>,
        pub quantity: Option<i64>,
        pub rating: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductView {
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

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductListQuery {
        pub category: Option<String>,
    }
}

pub mod order {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderItem {
        pub product_id: Option<String>,
        pub product_name: String,
        pub quantity: i64,
        pub price: i64,
        pub subtotal: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderNew {
        pub customer_name: Option<String>,
        pub customer_phone: Option<String>,
        pub customer_address: Option<String>,
        pub store_id: Option<String>,
        pub store_name: Option<String>,
        pub items: Option<Vec<OrderItem>>,
        pub total_amount: Option<i64>,
        pub payment_method: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderUpdate {
        pub status: Option<String>,
        pub customer_name: Option<String>,
        pub customer_phone: Option<String>,
        pub customer_address: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderView {
        pub id: String,
        pub order_number: String,
        pub customer_name: String,
        pub customer_phone: String,
        pub customer_address: String,
        pub store_id: Option<String>,
        pub store_name: Option<String>,
        pub items: Vec<OrderItem>,
        pub total_amount: i64,
        pub status: String,
        pub payment_method: String,
        pub notes: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderListQuery {
        pub customer_phone: Option<String>,
    }
}

pub mod store {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StoreNew {
        pub name: Option<String>,
        pub address: Option<String>,
        pub lat: Option<f64>,
        pub lng: Option<f64>,
        pub phone: Option<String>,
        pub image: Option<String>,
        pub opening_hours: Option<String>,
        pub status: Option<String>,
        pub description: Option<String>,
        pub rating: Option<f64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StoreUpdate {
        pub name: Option<String>,
        pub address: Option<String>,
        pub lat: Option<f64>,
        pub lng: Option<f64>,
        pub phone: Option<String>,
        pub image: Option<String>,
        pub opening_hours: Option<String>,
        pub status: Option<String>,
        pub description: Option<String>,
        pub rating: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StoreView {
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
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Register {
        pub email: Option<String>,
        pub password: Option<String>,
        pub full_name: Option<String>,
        pub phone: Option<String>,
        pub role: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Login {
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileUpdate {
        pub full_name: Option<String>,
        pub phone: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub email: String,
        pub full_name: String,
        pub phone: String,
        pub role: String,
        pub created_at: DateTime<Utc>,
    }

    /// Register/login response: the bearer token plus the user it belongs to.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuthResponse {
        pub ok: bool,
        pub token: String,
        pub user: UserView,
    }
}

/// Plain confirmation body for deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub ok: bool,
    pub message: String,
}
