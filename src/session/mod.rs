//! Session service - the client-side authentication state.
//!
//! Replaces the original ambient auth context with an explicit,
//! dependency-injected service holding the current [`Identity`].
//! State is published through a watch channel, so any consumer (route
//! guards included) can subscribe to changes instead of reaching into
//! a global.
//!
//! Lifecycle: `Restoring -> {Authenticated | Anonymous}`, then
//! `login`/`logout` toggle between the latter two. Nothing else may
//! mutate the cache.

pub mod guard;
mod storage;
mod transport;

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::ROUTE_LANDING;
use crate::domain::Identity;
use crate::errors::AppResult;

pub use guard::{evaluate, GateDecision, GuardConfig};
pub use storage::{FileIdentityStorage, IdentityStorage};
pub use transport::{HttpLogoutTransport, LogoutTransport};

/// Current state of the per-tab session cache.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup restore has not completed yet.
    Restoring,
    Anonymous,
    Authenticated(Identity),
}

/// The session service.
pub struct Session {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn IdentityStorage>,
    transport: Arc<dyn LogoutTransport>,
}

impl Session {
    /// Create a session in the `Restoring` state.
    ///
    /// Callers must run [`Session::restore`] once before guard decisions
    /// are meaningful.
    pub fn new(storage: Arc<dyn IdentityStorage>, transport: Arc<dyn LogoutTransport>) -> Self {
        let (state, _) = watch::channel(SessionState::Restoring);
        Self {
            state,
            storage,
            transport,
        }
    }

    /// Seed the cache from persisted storage.
    ///
    /// A well-formed stored identity becomes the active session; a corrupt
    /// entry is discarded silently and the session starts empty. Either
    /// way the state leaves `Restoring`.
    pub fn restore(&self) {
        let next = match self.storage.load() {
            Ok(Some(identity)) => SessionState::Authenticated(identity),
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::debug!("discarding corrupt stored identity: {}", e);
                if let Err(e) = self.storage.clear() {
                    tracing::warn!("failed to clear corrupt stored identity: {}", e);
                }
                SessionState::Anonymous
            }
        };
        self.state.send_replace(next);
    }

    /// The current identity, if any.
    pub fn current(&self) -> Option<Identity> {
        match &*self.state.borrow() {
            SessionState::Authenticated(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    /// Whether the startup restore is still in flight.
    pub fn is_restoring(&self) -> bool {
        matches!(&*self.state.borrow(), SessionState::Restoring)
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Activate the given identity and persist it for reload survival.
    ///
    /// Pure state transition: the caller has already performed the login
    /// or signup call and hands the resulting identity in.
    pub fn login(&self, identity: Identity) -> AppResult<()> {
        self.storage.save(&identity)?;
        self.state
            .send_replace(SessionState::Authenticated(identity));
        Ok(())
    }

    /// End the session and return the route to navigate to.
    ///
    /// The server call is best effort; the local cache and persisted
    /// storage are cleared unconditionally, so the client never stays in
    /// a "thinks it's logged in" state after a failed network call.
    pub async fn logout(&self) -> &'static str {
        if let Err(e) = self.transport.logout().await {
            tracing::warn!("server logout failed, clearing local session anyway: {}", e);
        }

        self.state.send_replace(SessionState::Anonymous);
        if let Err(e) = self.storage.clear() {
            tracing::warn!("failed to clear persisted identity: {}", e);
        }

        ROUTE_LANDING
    }

    /// Evaluate a route guard against the current state.
    pub fn gate(&self, config: &GuardConfig) -> GateDecision {
        evaluate(&self.state.borrow(), config)
    }
}
