//! Credential store - durable user records
//!
//! The store owns the single backing credential file; nothing else in
//! the application writes it.

mod file_store;

pub use file_store::{CredentialStore, FileStore};

#[cfg(test)]
pub use file_store::MockCredentialStore;
