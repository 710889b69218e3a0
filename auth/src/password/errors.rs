use thiserror::Error;

/// Error type for password operations.
///
/// Neither variant means "wrong password"; a mismatch is reported as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
