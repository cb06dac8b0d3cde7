pub use chicken_transactions::{ChickenTransaction, TransactionKind};
pub use commands::{
    ChickenTransactionCmd, CoopUpdate, FeedCmd, OrderCmd, OrderUpdate, ProductCmd, ProductUpdate,
    RegisterCmd, StoreCmd, StoreUpdate,
};
pub use coops::Coop;
pub use error::EngineError;
pub use feeds::{Feed, FeedKind, Ingredient};
pub use ops::{Engine, EngineBuilder};
pub use orders::{Order, OrderItem, OrderStatus, PaymentMethod};
pub use products::Product;
pub use stores::{Store, StoreStatus};
pub use users::User;

mod chicken_transactions;
mod commands;
mod coops;
mod error;
mod feeds;
mod ops;
mod orders;
mod products;
mod stores;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
