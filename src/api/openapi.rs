//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::domain::{Identity, UserRole};

/// OpenAPI documentation for the auth service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Auth",
        version = "0.1.0",
        description = "Authentication and session service for the instructor/learner dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        auth_handler::logout,
    ),
    components(
        schemas(
            UserRole,
            Identity,
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
            auth_handler::AuthResponse,
            auth_handler::LogoutResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Signup, login, and logout")
    )
)]
pub struct ApiDoc;
