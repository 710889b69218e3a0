//! Credential authentication and token issuance
//!
//! Framework-independent building blocks for a login flow:
//! - Password hashing (Argon2id, hash and salt stored as separate fields)
//! - Credential store port for principal lookup
//! - Authenticator combining lookup and verification
//! - Token issuer minting HS256 access and refresh JWTs
//!
//! Transport, persistence and registration belong to the embedding service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &digest.hash, &digest.salt).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Issuance
//! ```
//! use auth::{AuthenticatedPrincipal, PrincipalId, Role, TokenIssuer, TokenSettings};
//!
//! let issuer = TokenIssuer::new(TokenSettings {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     issuer: "https://api.example.com".to_string(),
//!     access_ttl_seconds: 900,
//!     refresh_ttl_seconds: 604_800,
//! })
//! .unwrap();
//!
//! let principal = AuthenticatedPrincipal {
//!     id: PrincipalId(7),
//!     identifier: "admin@example.com".to_string(),
//!     role: Role::new("ADMIN"),
//! };
//! let tokens = issuer.issue(&principal).unwrap();
//! let claims = issuer.verify_access(&tokens.access_token).unwrap();
//! assert_eq!(claims.roles, vec!["ADMIN".to_string()]);
//! ```

pub mod authenticator;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod store;
pub mod tokens;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use errors::ConfigurationError;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::RefreshClaims;
pub use password::HasherSettings;
pub use password::PasswordDigest;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::AuthenticatedPrincipal;
pub use principal::Credential;
pub use principal::Principal;
pub use principal::PrincipalId;
pub use principal::Role;
pub use store::CredentialStore;
pub use store::CredentialStoreError;
pub use tokens::TokenIssuer;
pub use tokens::TokenPair;
pub use tokens::TokenSettings;
