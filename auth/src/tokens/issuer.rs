use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;

use crate::errors::ConfigurationError;
use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;
use crate::principal::AuthenticatedPrincipal;

/// Signing and lifetime configuration for issued tokens.
#[derive(Clone)]
pub struct TokenSettings {
    /// HS256 signing secret
    pub secret: String,
    /// Value of the `iss` claim (deployment origin)
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_ttl_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_seconds: i64,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl TokenSettings {
    /// Minimum HS256 secret length in bytes.
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Check the settings before any token is signed.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty
    /// * `WeakSigningKey` - Secret shorter than 32 bytes
    /// * `MissingIssuer` - Issuer is empty
    /// * `InvalidTtl` - A TTL is zero, negative, or pushes expiry past the
    ///   representable date range
    /// * `TtlOrdering` - Access TTL is not shorter than refresh TTL
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSigningKey);
        }
        if self.secret.len() < Self::MIN_SECRET_BYTES {
            return Err(ConfigurationError::WeakSigningKey {
                min: Self::MIN_SECRET_BYTES,
                actual: self.secret.len(),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigurationError::MissingIssuer);
        }
        ttl_duration("access", self.access_ttl_seconds)?;
        ttl_duration("refresh", self.refresh_ttl_seconds)?;
        if self.access_ttl_seconds >= self.refresh_ttl_seconds {
            return Err(ConfigurationError::TtlOrdering {
                access: self.access_ttl_seconds,
                refresh: self.refresh_ttl_seconds,
            });
        }
        Ok(())
    }
}

/// Convert a TTL in seconds, rejecting values whose expiry cannot be
/// represented from the current instant.
fn ttl_duration(kind: &str, seconds: i64) -> Result<Duration, ConfigurationError> {
    if seconds <= 0 {
        return Err(ConfigurationError::InvalidTtl(format!(
            "{} token TTL must be positive, got {}",
            kind, seconds
        )));
    }

    Duration::try_seconds(seconds)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| {
            ConfigurationError::InvalidTtl(format!(
                "{} token TTL of {} seconds is out of range",
                kind, seconds
            ))
        })
}

/// Access and refresh tokens minted by one successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: DateTime<Utc>,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Mints signed, time-bounded token pairs.
///
/// Stateless: expiry lives only in the signed claims, nothing is stored.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from validated settings.
    ///
    /// # Errors
    /// * `ConfigurationError` - Settings failed validation
    pub fn new(settings: TokenSettings) -> Result<Self, ConfigurationError> {
        settings.validate()?;

        Ok(Self {
            jwt_handler: JwtHandler::new(settings.secret.as_bytes(), &settings.issuer),
            issuer: settings.issuer,
            access_ttl: ttl_duration("access", settings.access_ttl_seconds)?,
            refresh_ttl: ttl_duration("refresh", settings.refresh_ttl_seconds)?,
        })
    }

    /// Issue an access/refresh token pair for an authenticated principal.
    ///
    /// # Arguments
    /// * `principal` - Principal returned by the authenticator
    ///
    /// # Returns
    /// TokenPair with both tokens and their expiry instants
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or an expiry is out of range
    pub fn issue(&self, principal: &AuthenticatedPrincipal) -> Result<TokenPair, JwtError> {
        // JWT timestamps have second precision.
        let issued_at = Utc::now().trunc_subsecs(0);
        let access_expires_at = expiry(issued_at, self.access_ttl)?;
        let refresh_expires_at = expiry(issued_at, self.refresh_ttl)?;

        let access_claims = AccessClaims::new(
            &principal.identifier,
            &self.issuer,
            issued_at,
            access_expires_at,
            vec![principal.role.as_str().to_string()],
        );
        let refresh_claims = RefreshClaims::new(
            &principal.identifier,
            &self.issuer,
            issued_at,
            refresh_expires_at,
        );

        Ok(TokenPair {
            access_token: self.jwt_handler.encode(&access_claims)?,
            refresh_token: self.jwt_handler.encode(&refresh_claims)?,
            issued_at,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, issuer, expiry or shape check failed
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate a refresh token and return its claims.
    ///
    /// Access tokens are rejected because their `roles` claim is unknown here.
    ///
    /// # Errors
    /// * `JwtError` - Signature, issuer, expiry or shape check failed
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

fn expiry(issued_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, JwtError> {
    issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| JwtError::EncodingFailed("token expiry out of range".to_string()))
}
