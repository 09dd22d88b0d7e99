//! Auth service port.
//!
//! The ordering core treats authentication as an opaque external service:
//! two request/response operations, consumed before the checkout UI is
//! reachable. Nothing here depends on the service's internals.

use async_trait::async_trait;

use crate::error::Result;

/// An established user session returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Human-readable confirmation message.
    pub message: String,
}

/// Account signup and login against the bistro backend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across async
/// tasks.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. Returns the service's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns an error when the service rejects the request (e.g. the user
    /// already exists) or the request fails to complete.
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String>;

    /// Establish a session. Returns the issued token and message.
    ///
    /// # Errors
    ///
    /// Returns an error on unknown user, bad password, or transport failure.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;
}
