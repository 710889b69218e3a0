use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticatedPrincipal;
use auth::Authenticator;
use auth::CredentialStore;
use auth::TokenIssuer;

use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::session::errors::SessionError;
use crate::session::ports::SessionServicePort;

/// Domain service implementation for login and refresh.
///
/// Runs the explicit sequence authenticate, then issue. Nothing is stored
/// between calls.
pub struct SessionService<S>
where
    S: CredentialStore,
{
    authenticator: Arc<Authenticator<S>>,
    token_issuer: Arc<TokenIssuer>,
}

impl<S> SessionService<S>
where
    S: CredentialStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `authenticator` - Credential verification over the deployment's store
    /// * `token_issuer` - Configured token issuer
    pub fn new(authenticator: Arc<Authenticator<S>>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            authenticator,
            token_issuer,
        }
    }

    fn open_session(&self, principal: AuthenticatedPrincipal) -> Result<Session, SessionError> {
        let tokens = self.token_issuer.issue(&principal)?;
        Ok(Session { principal, tokens })
    }
}

fn log_failure(operation: &str, err: &SessionError) {
    if err.is_internal() {
        tracing::error!(operation, error = %err, "Session operation failed");
    } else {
        tracing::warn!(operation, "Session operation rejected");
    }
}

#[async_trait]
impl<S> SessionServicePort for SessionService<S>
where
    S: CredentialStore,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let result = match self
            .authenticator
            .authenticate(command.into_credential())
            .await
        {
            Ok(principal) => self.open_session(principal),
            Err(e) => Err(SessionError::from(e)),
        };

        match &result {
            Ok(session) => tracing::info!(
                principal_id = %session.principal.id,
                role = %session.principal.role,
                "Login succeeded"
            ),
            Err(e) => log_failure("login", e),
        }

        result
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError> {
        let claims = self.token_issuer.verify_refresh(refresh_token).map_err(|e| {
            tracing::debug!(reason = %e, "Refresh token rejected");
            SessionError::InvalidCredentials
        });

        let result = match claims {
            Ok(claims) => match self.authenticator.resolve(&claims.sub).await {
                Ok(principal) => self.open_session(principal),
                Err(e) => Err(SessionError::from(e)),
            },
            Err(e) => Err(e),
        };

        match &result {
            Ok(session) => tracing::info!(
                principal_id = %session.principal.id,
                role = %session.principal.role,
                "Refresh succeeded"
            ),
            Err(e) => log_failure("refresh", e),
        }

        result
    }
}
