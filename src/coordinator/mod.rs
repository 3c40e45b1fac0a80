//! Coordinator implementation
//!
//! The coordinator is responsible for:
//! - Fanning every client read and write out to all vaults concurrently
//! - Deciding writes by majority acknowledgment
//! - Deciding reads by majority vote
//! - Refusing writes that would move the counter backwards

pub mod control;
pub mod fanout;
pub mod http;
pub mod server;
pub mod vault_client;

pub use control::{Control, WriteReport};
pub use server::Coordinator;
pub use vault_client::{HttpVaultClient, VaultClient};
