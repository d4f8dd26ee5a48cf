//! The module contains the errors the ledger can throw.
//!
//! - [`KeyNotFound`] when a wallet/transaction/category/loan is absent.
//! - [`InvalidAmount`] / [`InvalidKind`] for rejected input.
//! - [`Conflict`] when an atomic unit could not serialize after retries.
//!
//! [`KeyNotFound`]: LedgerError::KeyNotFound
//! [`InvalidAmount`]: LedgerError::InvalidAmount
//! [`InvalidKind`]: LedgerError::InvalidKind
//! [`Conflict`]: LedgerError::Conflict
use sea_orm::DbErr;
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction kind: {0}")]
    InvalidKind(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
