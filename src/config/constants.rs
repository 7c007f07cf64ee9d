//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// User Roles
// =============================================================================

/// Role for course authors and dashboard users
pub const ROLE_INSTRUCTOR: &str = "instructor";

/// Role for enrolled students
pub const ROLE_LEARNER: &str = "learner";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_INSTRUCTOR, ROLE_LEARNER];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Session & Cookies
// =============================================================================

/// Name of the cookie that marks an active browser session.
///
/// The server-side gate only checks for its presence, never its contents.
pub const SESSION_COOKIE: &str = "session";

/// Fixed storage key for the persisted identity on the client side
pub const SESSION_STORAGE_KEY: &str = "auth-user";

// =============================================================================
// Routes
// =============================================================================

/// Public landing page (also the default guard fallback)
pub const ROUTE_LANDING: &str = "/";

/// Sign-in page, the only page reachable without a session
pub const ROUTE_SIGN_IN: &str = "/signin";

/// Instructor home
pub const ROUTE_DASHBOARD: &str = "/dashboard";

/// Learner home
pub const ROUTE_CHAT: &str = "/chat";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default path of the JSON credential file
pub const DEFAULT_USERS_FILE: &str = "data/users.json";

/// Default directory holding the built dashboard bundle
pub const DEFAULT_STATIC_DIR: &str = "public";

// =============================================================================
// Client Configuration
// =============================================================================

/// Default base URL the session service calls for logout
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default timeout for client-side auth calls, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: u64 = 1;
