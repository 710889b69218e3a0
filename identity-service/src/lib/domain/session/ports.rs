use async_trait::async_trait;

use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::session::errors::SessionError;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext secret
    ///
    /// # Returns
    /// Session with the authenticated principal and fresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong secret
    /// * `StoreError` - Credential store could not be queried
    /// * `PasswordError` - Password verification could not run
    /// * `TokenError` - Token signing failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The principal's role is read again from the credential store.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token from an earlier login or refresh
    ///
    /// # Returns
    /// Session with the current principal and fresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token invalid, expired, not a refresh token,
    ///   or its subject no longer exists
    /// * `StoreError` - Credential store could not be queried
    /// * `TokenError` - Token signing failed
    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError>;
}
