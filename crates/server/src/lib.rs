use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod chickens;
mod coops;
mod feeds;
mod orders;
mod products;
mod server;
mod stores;
mod users;

pub mod types {
    pub mod coop {
        pub use api_types::coop::{CoopNew, CoopUpdate, CoopView};
    }

    pub mod chicken {
        pub use api_types::chicken::{
            TransactionCreated, TransactionDeleted, TransactionListQuery, TransactionNew,
            TransactionView,
        };
    }

    pub mod feed {
        pub use api_types::feed::{FeedListQuery, FeedNew, FeedView, Ingredient};
    }

    pub mod product {
        pub use api_types::product::{ProductListQuery, ProductNew, ProductUpdate, ProductView};
    }

    pub mod order {
        pub use api_types::order::{OrderItem, OrderListQuery, OrderNew, OrderUpdate, OrderView};
    }

    pub mod store {
        pub use api_types::store::{StoreNew, StoreUpdate, StoreView};
    }

    pub mod user {
        pub use api_types::user::{AuthResponse, Login, ProfileUpdate, Register, UserView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::MissingField(_)
        | EngineError::InvalidName(_)
        | EngineError::DuplicateName(_)
        | EngineError::InvalidType(_)
        | EngineError::InvalidQuantity(_)
        | EngineError::InvalidOperation(_)
        | EngineError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Unwrap an optional payload field or fail with a missing-field error.
fn required<T>(value: Option<T>, label: &str) -> Result<T, ServerError> {
    value.ok_or_else(|| ServerError::Engine(EngineError::MissingField(label.to_string())))
}
