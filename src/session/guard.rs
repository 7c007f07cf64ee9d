//! Client-side route guard.
//!
//! Pure decision logic over the session state: a page wrapped by the
//! guard is rendered, waited on, or silently redirected. Redirects are
//! the only denial signal; there is no error surface.

use crate::config::ROUTE_LANDING;
use crate::domain::UserRole;

use super::SessionState;

/// What the guarded page should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session restore still in flight; show a loading indicator and do
    /// NOT redirect yet.
    Wait,
    /// Render the guarded content.
    Allow,
    /// Navigate away without rendering.
    Redirect(String),
}

/// Per-page guard configuration.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Roles allowed to see the page.
    pub allowed_user_types: Vec<UserRole>,
    /// Where anonymous visitors go.
    pub redirect_to: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            allowed_user_types: vec![UserRole::Instructor, UserRole::Learner],
            redirect_to: ROUTE_LANDING.to_string(),
        }
    }
}

impl GuardConfig {
    /// Restrict the page to the given roles.
    pub fn allow(roles: impl Into<Vec<UserRole>>) -> Self {
        Self {
            allowed_user_types: roles.into(),
            ..Self::default()
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }
}

/// Evaluate the guard for the current session state.
///
/// A signed-in user with the wrong role is sent to their own home page
/// (instructor to the dashboard, learner to the chat), not to the
/// configured fallback.
pub fn evaluate(state: &SessionState, config: &GuardConfig) -> GateDecision {
    match state {
        SessionState::Restoring => GateDecision::Wait,
        SessionState::Anonymous => GateDecision::Redirect(config.redirect_to.clone()),
        SessionState::Authenticated(identity) => {
            if config.allowed_user_types.contains(&identity.user_type) {
                GateDecision::Allow
            } else {
                GateDecision::Redirect(identity.user_type.home_route().to_string())
            }
        }
    }
}
