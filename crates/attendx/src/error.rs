//! Error types for attendx.
//!
//! Read failures inside the ledger are recovered before they reach this type;
//! what surfaces here are write failures, configuration problems, and the
//! on-chain check-in errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for attendx operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Ledger Errors ===
    /// No event with the given identifier exists.
    #[error("event not found: {id}")]
    EventNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    // === On-chain Errors ===
    /// A check-in was attempted without a connected wallet.
    #[error("wallet not connected")]
    WalletNotConnected,

    /// The contract client rejected or failed a call.
    #[error("contract call '{method}' failed: {message}")]
    ContractCall {
        /// Name of the contract method.
        method: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for attendx operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an event-not-found error.
    #[must_use]
    pub fn event_not_found(id: impl Into<String>) -> Self {
        Self::EventNotFound { id: id.into() }
    }

    /// Create a contract call error.
    #[must_use]
    pub fn contract_call(method: &'static str, message: impl Into<String>) -> Self {
        Self::ContractCall {
            method,
            message: message.into(),
        }
    }

    /// Check if this error indicates a missing event.
    #[must_use]
    pub fn is_event_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound { .. })
    }

    /// Check if this error indicates no wallet is connected.
    #[must_use]
    pub fn is_wallet_not_connected(&self) -> bool {
        matches!(self, Self::WalletNotConnected)
    }
}
