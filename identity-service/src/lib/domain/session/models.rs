use std::fmt;
use std::str::FromStr;

use auth::AuthenticatedPrincipal;
use auth::Credential;
use auth::TokenPair;

use crate::session::errors::EmailError;

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to log in with an email and plaintext secret.
pub struct LoginCommand {
    pub email: EmailAddress,
    pub secret: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, secret: String) -> Self {
        Self { email, secret }
    }

    /// Consume the command into the credential handed to the authenticator.
    pub fn into_credential(self) -> Credential {
        Credential::new(self.email.0, self.secret)
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Outcome of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: AuthenticatedPrincipal,
    pub tokens: TokenPair,
}
