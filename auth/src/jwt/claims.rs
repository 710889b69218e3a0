use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Subject is the principal's identifier; `roles` holds the authority granted
/// at issuance time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Role labels
    pub roles: Vec<String>,
}

impl AccessClaims {
    /// Build access claims valid from `issued_at` until `expires_at`.
    pub fn new(
        subject: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            roles,
        }
    }

    /// Check if the token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Claims carried by a refresh token.
///
/// Deliberately role-free: a refresh must re-derive authority from the
/// credential store. Unknown fields are rejected, so an access token (which
/// carries `roles`) never decodes as a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Build refresh claims valid from `issued_at` until `expires_at`.
    pub fn new(
        subject: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Check if the token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_access_claims_expiry() {
        let now = Utc::now();
        let claims = AccessClaims::new(
            "user@example.com",
            "https://api.example.com",
            now,
            now + Duration::minutes(15),
            vec!["ADMIN".to_string()],
        );

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.roles, vec!["ADMIN".to_string()]);
    }

    #[test]
    fn test_refresh_claims_serialize_without_roles() {
        let now = Utc::now();
        let claims = RefreshClaims::new("user@example.com", "iss", now, now + Duration::days(7));
        let json = serde_json::to_value(&claims).expect("Failed to serialize claims");

        assert!(json.get("roles").is_none());
        assert_eq!(json["sub"], "user@example.com");
    }

    #[test]
    fn test_refresh_claims_reject_role_payload() {
        let payload = serde_json::json!({
            "sub": "user@example.com",
            "iss": "iss",
            "iat": 0,
            "exp": 10,
            "roles": ["ADMIN"],
        });

        let result = serde_json::from_value::<RefreshClaims>(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_expired() {
        let claims = RefreshClaims {
            sub: "s".to_string(),
            iss: "i".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }
}
