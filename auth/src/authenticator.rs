use std::sync::Arc;

use crate::password::PasswordDigest;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::principal::AuthenticatedPrincipal;
use crate::principal::Credential;
use crate::store::CredentialStore;
use crate::store::CredentialStoreError;

/// Secret behind the decoy digest verified for unknown identifiers.
const DECOY_SECRET: &str = "decoy-secret-for-unknown-identifiers";

/// Credential verification against a credential store.
///
/// Resolves the principal, then checks the secret on the blocking thread pool.
/// Unknown identifiers and wrong secrets produce the same
/// `AuthenticationFailed`, and both paths run one full hash derivation.
pub struct Authenticator<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    hasher: Arc<PasswordHasher>,
    decoy: PasswordDigest,
}

/// Authentication operation errors.
///
/// Only `AuthenticationFailed` is a verdict on the caller's credentials; every
/// other variant means the system is broken.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Credential store error: {0}")]
    StoreError(#[from] CredentialStoreError),

    #[error("Blocking task failed: {0}")]
    TaskFailed(String),
}

impl AuthenticationError {
    /// True for infrastructure failures, false for rejected credentials.
    pub fn is_internal(&self) -> bool {
        !matches!(self, AuthenticationError::AuthenticationFailed)
    }
}

impl<S> Authenticator<S>
where
    S: CredentialStore,
{
    /// Create a new authenticator.
    ///
    /// Computes the decoy digest up front, so this performs one hash derivation.
    ///
    /// # Arguments
    /// * `store` - Credential lookup implementation
    /// * `hasher` - Password hasher configured with the deployment's cost parameters
    ///
    /// # Errors
    /// * `PasswordError` - Decoy digest could not be derived
    pub fn new(store: Arc<S>, hasher: PasswordHasher) -> Result<Self, PasswordError> {
        let decoy = hasher.hash(DECOY_SECRET)?;

        Ok(Self {
            store,
            hasher: Arc::new(hasher),
            decoy,
        })
    }

    /// Verify a credential.
    ///
    /// # Arguments
    /// * `credential` - Identifier and plaintext secret; consumed
    ///
    /// # Returns
    /// The authenticated principal, without password material
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown identifier or wrong secret
    /// * `StoreError` - Credential store could not be queried
    /// * `PasswordError` - Stored digest malformed or hashing failed
    /// * `TaskFailed` - Blocking verification task panicked or was cancelled
    pub async fn authenticate(
        &self,
        credential: Credential,
    ) -> Result<AuthenticatedPrincipal, AuthenticationError> {
        let Credential { identifier, secret } = credential;

        let principal = self.store.find_by_identifier(&identifier).await?;

        let digest = match &principal {
            Some(principal) => principal.digest.clone(),
            None => self.decoy.clone(),
        };
        let matches = self.verify_blocking(secret, digest).await?;

        match principal {
            Some(principal) if matches => {
                tracing::debug!(principal_id = %principal.id, "Credentials verified");
                Ok(AuthenticatedPrincipal::from(&principal))
            }
            _ => Err(AuthenticationError::AuthenticationFailed),
        }
    }

    /// Look up a principal without checking a secret.
    ///
    /// Used when identity was already proven by other means (a valid refresh
    /// token), so authority is read fresh from the store.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - No principal with this identifier
    /// * `StoreError` - Credential store could not be queried
    pub async fn resolve(
        &self,
        identifier: &str,
    ) -> Result<AuthenticatedPrincipal, AuthenticationError> {
        self.store
            .find_by_identifier(identifier)
            .await?
            .as_ref()
            .map(AuthenticatedPrincipal::from)
            .ok_or(AuthenticationError::AuthenticationFailed)
    }

    async fn verify_blocking(
        &self,
        secret: String,
        digest: PasswordDigest,
    ) -> Result<bool, AuthenticationError> {
        let hasher = Arc::clone(&self.hasher);

        let result = tokio::task::spawn_blocking(move || hasher.verify_digest(&secret, &digest))
            .await
            .map_err(|e| AuthenticationError::TaskFailed(e.to_string()))?;

        result.map_err(|e| {
            tracing::error!(error = %e, "Password verification failed");
            AuthenticationError::from(e)
        })
    }
}
