//! Common utilities and types shared across quorum-counter

pub mod config;
pub mod error;
pub mod quorum;
pub mod tracing_middleware;
pub mod utils;

pub use config::{Config, ControlConfig, VaultConfig};
pub use error::{Error, Result};
pub use quorum::{has_majority, majority, VoteTally, NO_CONSENSUS};
pub use tracing_middleware::{request_tracing_middleware, REQUEST_ID_HEADER};
pub use utils::{
    init_tracing, invalid_path, parse_counter, parse_vault_list, reject_oversized_body,
    MAX_BODY_BYTES,
};
