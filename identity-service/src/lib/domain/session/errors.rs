use auth::AuthenticationError;
use auth::JwtError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for login and refresh operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    // The only caller-facing failure: unknown identifier, wrong secret,
    // or an unusable refresh token all land here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Credential store error: {0}")]
    StoreError(String),

    #[error("Password error: {0}")]
    PasswordError(String),

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SessionError {
    pub fn is_internal(&self) -> bool {
        !matches!(self, SessionError::InvalidCredentials)
    }
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::AuthenticationFailed => SessionError::InvalidCredentials,
            AuthenticationError::StoreError(e) => SessionError::StoreError(e.to_string()),
            AuthenticationError::PasswordError(e) => SessionError::PasswordError(e.to_string()),
            AuthenticationError::TaskFailed(e) => SessionError::Unknown(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::CredentialStoreError;
    use auth::PasswordError;

    use super::*;

    #[test]
    fn test_authentication_failure_maps_to_invalid_credentials() {
        let err = SessionError::from(AuthenticationError::AuthenticationFailed);
        assert!(matches!(err, SessionError::InvalidCredentials));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_infrastructure_failures_are_internal() {
        let store = SessionError::from(AuthenticationError::StoreError(
            CredentialStoreError::Unavailable("down".to_string()),
        ));
        let password = SessionError::from(AuthenticationError::PasswordError(
            PasswordError::HashingFailed("boom".to_string()),
        ));

        assert!(matches!(store, SessionError::StoreError(_)));
        assert!(matches!(password, SessionError::PasswordError(_)));
        assert!(store.is_internal());
        assert!(password.is_internal());
    }
}
