//! Vault server implementation
//!
//! A vault holds one in-memory counter and answers two requests:
//! read the counter, and overwrite it.

pub mod counter;
pub mod http;
pub mod server;

pub use counter::VaultCounter;
pub use server::VaultServer;
