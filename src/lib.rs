//! Campus Auth - authentication and session service for the
//! instructor/learner dashboard.
//!
//! Three cooperating pieces:
//!
//! - **Credential store** ([`store`]): a file-backed mapping from email
//!   to user record, with Argon2-hashed passwords, advisory locking,
//!   and atomic replace-on-write.
//! - **Session service** ([`session`]): the client-side session cache
//!   with persisted restore, subscription on change, and a best-effort
//!   logout call that always clears local state.
//! - **Route gate**: a server-side interceptor
//!   ([`api::middleware::session_gate`]) that checks the session cookie
//!   on navigable requests, and a role-aware client guard
//!   ([`session::guard`]).
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities (user records, identities, passwords)
//! - **store**: Credential persistence
//! - **services**: Application use cases
//! - **session**: Client-side session state and guards
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod session;
pub mod store;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Identity, Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use session::{Session, SessionState};
