use std::fmt;

use serde::Serialize;

use crate::password::PasswordDigest;

/// Principal unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PrincipalId(pub i64);

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role label granted to a principal (e.g. `ADMIN`, `CUSTOMER`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Role(String);

impl Role {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored authentication record for an identity.
///
/// Created by an external registration flow and read-only here. The password
/// digest is only reachable from inside this crate.
#[derive(Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub identifier: String,
    pub role: Role,
    pub(crate) digest: PasswordDigest,
}

impl Principal {
    /// Assemble a principal from stored fields.
    ///
    /// # Arguments
    /// * `id` - Principal ID
    /// * `identifier` - Unique login identifier (email)
    /// * `digest` - Stored password hash and salt
    /// * `role` - Role label
    pub fn new(
        id: PrincipalId,
        identifier: impl Into<String>,
        digest: PasswordDigest,
        role: Role,
    ) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            role,
            digest,
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("identifier", &self.identifier)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied login attempt. Never persisted.
pub struct Credential {
    pub identifier: String,
    pub secret: String,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Identity proven by a successful authentication.
///
/// Passed explicitly to the token issuer and onward; carries no password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    pub id: PrincipalId,
    pub identifier: String,
    pub role: Role,
}

impl From<&Principal> for AuthenticatedPrincipal {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            identifier: principal.identifier.clone(),
            role: principal.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_debug_hides_digest() {
        let principal = Principal::new(
            PrincipalId(7),
            "user@example.com",
            PasswordDigest::new("stored-hash", "stored-salt"),
            Role::new("ADMIN"),
        );

        let rendered = format!("{:?}", principal);
        assert!(rendered.contains("user@example.com"));
        assert!(!rendered.contains("stored-hash"));
        assert!(!rendered.contains("stored-salt"));
    }

    #[test]
    fn test_credential_debug_hides_secret() {
        let credential = Credential::new("user@example.com", "correct-pw");
        let rendered = format!("{:?}", credential);

        assert!(!rendered.contains("correct-pw"));
    }

    #[test]
    fn test_authenticated_principal_from_principal() {
        let principal = Principal::new(
            PrincipalId(7),
            "user@example.com",
            PasswordDigest::new("h", "s"),
            Role::new("ADMIN"),
        );

        let authenticated = AuthenticatedPrincipal::from(&principal);
        assert_eq!(authenticated.id, PrincipalId(7));
        assert_eq!(authenticated.identifier, "user@example.com");
        assert_eq!(authenticated.role.as_str(), "ADMIN");
    }
}
