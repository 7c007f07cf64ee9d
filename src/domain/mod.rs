//! Domain layer - Core business entities and logic
//!
//! Contains the core models that represent the auth subsystem's
//! concepts independent of infrastructure concerns.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{Identity, NewUser, User, UserRole};
