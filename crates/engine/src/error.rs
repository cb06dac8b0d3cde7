//! The module contains the errors the engine can throw.
//!
//! Validation errors (`MissingField`, `InvalidName`, `InvalidType`,
//! `InvalidQuantity`) and the ledger state error (`InvalidOperation`) are
//! raised before any write, so a failed operation never leaves partial
//! state behind.
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("\"{0}\" already exists!")]
    DuplicateName(String),
    #[error("invalid type: {0}")]
    InvalidType(String),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("invalid status transition: {0}")]
    InvalidTransition(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::DuplicateName(a), Self::DuplicateName(b)) => a == b,
            (Self::InvalidType(a), Self::InvalidType(b)) => a == b,
            (Self::InvalidQuantity(a), Self::InvalidQuantity(b)) => a == b,
            (Self::InvalidOperation(a), Self::InvalidOperation(b)) => a == b,
            (Self::InvalidTransition(a), Self::InvalidTransition(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
