use thiserror::Error;

/// Startup configuration errors.
///
/// All of these are fatal: a process that hits one must not serve traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Token signing secret is missing")]
    MissingSigningKey,

    #[error("Token signing secret too short: minimum {min} bytes, got {actual}")]
    WeakSigningKey { min: usize, actual: usize },

    #[error("Token issuer is missing")]
    MissingIssuer,

    #[error("Invalid token TTL: {0}")]
    InvalidTtl(String),

    #[error("Access token TTL ({access}s) must be shorter than refresh token TTL ({refresh}s)")]
    TtlOrdering { access: i64, refresh: i64 },

    #[error("Invalid password hasher parameters: {0}")]
    InvalidHasherParams(String),
}
