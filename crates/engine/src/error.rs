//! The module contains the errors the engine can return.
//!
//! Ledger operations only ever fail with a user-correctable reason:
//!
//! - [`InvalidAmount`] an amount is missing, malformed or out of range.
//! - [`InsufficientBalance`] the balance cannot cover the transfer.
//! - [`InvalidEdit`] an edit would leave a dream with more saved than it costs.
//! - [`InvalidName`] a dream name is empty.
//! - [`DreamIncomplete`] a dream is achieved before it is fully funded.
//!
//! [`Io`] and [`Serialization`] come from the storage layer and are only
//! returned while loading or by a [`KeyValueStore`] directly.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InsufficientBalance`]: EngineError::InsufficientBalance
//!  [`InvalidEdit`]: EngineError::InvalidEdit
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`DreamIncomplete`]: EngineError::DreamIncomplete
//!  [`Io`]: EngineError::Io
//!  [`Serialization`]: EngineError::Serialization
//!  [`KeyValueStore`]: crate::KeyValueStore
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("\"{0}\" is not complete yet!")]
    DreamIncomplete(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InsufficientBalance(a), Self::InsufficientBalance(b)) => a == b,
            (Self::InvalidEdit(a), Self::InvalidEdit(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::DreamIncomplete(a), Self::DreamIncomplete(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
