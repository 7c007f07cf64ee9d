//! Logout transport - the session service's only network call.
//!
//! Login and signup responses are passed into the session by the caller;
//! only logout talks to the server itself, to invalidate any server-side
//! notion of the session. The call has a bounded timeout and is never
//! retried.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

/// Server logout call used by [`super::Session::logout`].
#[async_trait]
pub trait LogoutTransport: Send + Sync {
    async fn logout(&self) -> AppResult<()>;
}

/// HTTP implementation posting to `/api/auth/logout`.
pub struct HttpLogoutTransport {
    client: reqwest::Client,
    logout_url: String,
}

impl HttpLogoutTransport {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            logout_url: format!("{}/api/auth/logout", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl LogoutTransport for HttpLogoutTransport {
    async fn logout(&self) -> AppResult<()> {
        let response = self
            .client
            .post(&self.logout_url)
            .send()
            .await
            .map_err(map_request_error)?;

        response.error_for_status().map_err(map_request_error)?;
        Ok(())
    }
}

fn map_request_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout
    } else {
        AppError::internal(format!("Logout request failed: {}", e))
    }
}
