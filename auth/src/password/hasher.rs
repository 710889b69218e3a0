use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Output;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use crate::errors::ConfigurationError;

/// Argon2 cost parameters.
///
/// Changing any of these invalidates every digest produced with the old values,
/// because only the hash and salt are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherSettings {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HasherSettings {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Stored password material: hash and salt kept as two independent fields.
///
/// Both parts are unpadded base64 strings.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
}

impl PasswordDigest {
    pub fn new(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &"[redacted]")
            .field("salt", &"[redacted]")
            .finish()
    }
}

/// Password hashing implementation.
///
/// Derives Argon2id hashes with a random per-secret salt. The derivation is
/// CPU and memory intensive; async callers should run it on a blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the argon2 crate's default cost parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidHasherParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_settings(settings: HasherSettings) -> Result<Self, ConfigurationError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| ConfigurationError::InvalidHasherParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext secret with a freshly generated salt.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to hash
    ///
    /// # Returns
    /// Digest holding the hash and the salt as separate fields
    ///
    /// # Errors
    /// * `HashingFailed` - The Argon2 derivation failed
    pub fn hash(&self, secret: &str) -> Result<PasswordDigest, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let output = self.derive(secret, &salt)?;

        Ok(PasswordDigest {
            hash: output.to_string(),
            salt: salt.as_str().to_string(),
        })
    }

    /// Verify a plaintext secret against a stored hash and salt.
    ///
    /// A mismatch is `Ok(false)`, never an error.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `hash` - Stored hash (base64)
    /// * `salt` - Stored salt (base64)
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash or salt is malformed
    /// * `HashingFailed` - The Argon2 derivation failed
    pub fn verify(&self, secret: &str, hash: &str, salt: &str) -> Result<bool, PasswordError> {
        let salt = SaltString::from_b64(salt).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password salt: {}", e))
        })?;
        let expected = Output::b64_decode(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        let computed = self.derive(secret, &salt)?;

        // `Output` compares in constant time.
        Ok(computed == expected)
    }

    /// Verify a secret against a digest.
    pub fn verify_digest(
        &self,
        secret: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordError> {
        self.verify(secret, &digest.hash, &digest.salt)
    }

    fn derive(&self, secret: &str, salt: &SaltString) -> Result<Output, PasswordError> {
        self.argon2
            .hash_password(secret.as_bytes(), salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
            .hash
            .ok_or_else(|| PasswordError::HashingFailed("Argon2 produced no output".to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
