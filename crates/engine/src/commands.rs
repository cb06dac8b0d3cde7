//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use crate::{
    chicken_transactions::TransactionKind,
    feeds::{FeedKind, Ingredient},
    orders::{OrderItem, OrderStatus, PaymentMethod},
    stores::StoreStatus,
};

/// Create a chicken import/export transaction.
#[derive(Clone, Debug)]
pub struct ChickenTransactionCmd {
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
}

impl ChickenTransactionCmd {
    #[must_use]
    pub fn new(coop_id: String, kind: TransactionKind, quantity: i64) -> Self {
        Self {
            coop_id,
            kind,
            quantity,
            reason: String::new(),
            breed: String::new(),
            note: String::new(),
            start_date: String::new(),
            chick_price: 0,
            supplier: String::new(),
            sale_price: 0,
        }
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    #[must_use]
    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = breed.into();
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self
    }

    #[must_use]
    pub fn chick_price(mut self, chick_price: i64) -> Self {
        self.chick_price = chick_price;
        self
    }

    #[must_use]
    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    #[must_use]
    pub fn sale_price(mut self, sale_price: i64) -> Self {
        self.sale_price = sale_price;
        self
    }
}

/// Client-writable coop fields. Aggregate counters are deliberately absent.
#[derive(Clone, Debug, Default)]
pub struct CoopUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Create a feed application.
#[derive(Clone, Debug)]
pub struct FeedCmd {
    pub name: String,
    pub kind: FeedKind,
    pub coop_id: Option<String>,
    pub ingredients: Vec<Ingredient>,
    /// Trusted from the caller; the engine does not recompute it from the
    /// ingredient lines.
    pub total_cost: i64,
}

/// Create a product.
#[derive(Clone, Debug)]
pub struct ProductCmd {
    pub name: String,
    pub category: Option<String>,
    pub price: i64,
    pub description: String,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
    pub quantity: Option<i64>,
    pub rating: Option<f64>,
}

/// Patch a product.
#[derive(Clone, Debug, Default)]
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

/// Create an order. The order number is generated by the engine.
#[derive(Clone, Debug)]
pub struct OrderCmd {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: i64,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

/// Patch an order. A status change goes through the transition check.
#[derive(Clone, Debug, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub notes: Option<String>,
}

/// Create a store.
#[derive(Clone, Debug)]
pub struct StoreCmd {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: String,
    pub image: Option<String>,
    pub opening_hours: Option<String>,
    pub status: Option<StoreStatus>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

/// Patch a store.
#[derive(Clone, Debug, Default)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub opening_hours: Option<String>,
    pub status: Option<StoreStatus>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

/// Register a new user.
#[derive(Clone, Debug)]
pub struct RegisterCmd {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}
