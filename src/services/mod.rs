//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and the credential store to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;

pub use auth_service::{AuthService, Authenticator, Signup};
