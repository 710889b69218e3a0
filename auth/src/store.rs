use async_trait::async_trait;
use thiserror::Error;

use crate::principal::Principal;

/// Infrastructure failure while reading credentials.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of stored authentication records.
///
/// Implemented by the embedding service's persistence adapter.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve principal by unique identifier.
    ///
    /// # Arguments
    /// * `identifier` - Login identifier (email)
    ///
    /// # Returns
    /// Optional principal (None if no record matches)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be queried
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Principal>, CredentialStoreError>;
}
