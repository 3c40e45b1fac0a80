//! Error types for quorum-counter

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Client Input Errors ===
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid or missing POST body")]
    InvalidBody,

    #[error("Client would make value decrease from {current} to {requested}")]
    Regression { current: u64, requested: u64 },

    // === Quorum Errors ===
    #[error("Sent updates to {acked}/{total} vaults")]
    QuorumNotReached { acked: usize, total: usize },

    #[error("No consensus among {total} vaults")]
    NoConsensus { total: usize },

    // === Vault Errors ===
    #[error("Vault {vault} unreachable: {reason}")]
    VaultUnreachable { vault: String, reason: String },

    #[error("Vault {vault} answered with status {status}")]
    VaultStatus { vault: String, status: u16 },

    #[error("Vault {vault} sent a malformed body: {body:?}")]
    MalformedReply { vault: String, body: String },

    #[error("Vault {vault} echoed {echoed} instead of {expected}")]
    EchoMismatch {
        vault: String,
        expected: u64,
        echoed: u64,
    },

    #[error("Operation timeout: {0}")]
    Timeout(String),

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Is this a client input error, detected before any vault I/O?
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPath(_) | Error::InvalidBody | Error::Regression { .. }
        )
    }

    /// Is this a per-vault failure? These only ever count as missing votes.
    pub fn is_vault_error(&self) -> bool {
        matches!(
            self,
            Error::VaultUnreachable { .. }
                | Error::VaultStatus { .. }
                | Error::MalformedReply { .. }
                | Error::EchoMismatch { .. }
                | Error::Timeout(_)
        )
    }

    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.to_http_status();
        let body = match &self {
            // Reads without consensus answer with the reserved sentinel.
            Error::NoConsensus { .. } => crate::common::quorum::NO_CONSENSUS.to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
