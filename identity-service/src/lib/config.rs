use std::env;
use std::fmt;

use auth::HasherSettings;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    /// Left empty when unset so startup reports `MissingSigningKey`
    #[serde(default)]
    pub secret: String,
    pub issuer: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl JwtConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            secret: self.secret.clone(),
            issuer: self.issuer.clone(),
            access_ttl_seconds: self.access_ttl_seconds,
            refresh_ttl_seconds: self.refresh_ttl_seconds,
        }
    }
}

/// Argon2 cost parameters
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let defaults = HasherSettings::default();
        Self {
            memory_kib: defaults.memory_kib,
            iterations: defaults.iterations,
            parallelism: defaults.parallelism,
        }
    }
}

impl PasswordConfig {
    pub fn hasher_settings(&self) -> HasherSettings {
        HasherSettings {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Only structure is checked here; token and hasher settings are
    /// validated when the issuer and hasher are built.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(environment())
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }
}

/// Unprefixed variables, `__` between path segments.
///
/// Example: JWT__SECRET=... overrides jwt.secret
fn environment() -> Environment {
    Environment::default().separator("__").try_parsing(true)
}

#[cfg(test)]
mod tests {
    use auth::ConfigurationError;
    use auth::TokenIssuer;
    use config::Map;

    use super::*;

    fn jwt_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            issuer: "http://localhost:8080".to_string(),
            access_ttl_seconds: 900,
            refresh_ttl_seconds: 1_209_600,
        }
    }

    #[test]
    fn test_jwt_config_debug_hides_secret() {
        let config = jwt_config("super-secret-value-that-is-long-enough");
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }

    #[test]
    fn test_missing_secret_fails_issuer_construction() {
        let result = TokenIssuer::new(jwt_config("").token_settings());
        assert!(matches!(result, Err(ConfigurationError::MissingSigningKey)));
    }

    #[test]
    fn test_valid_jwt_config_builds_issuer() {
        let result = TokenIssuer::new(
            jwt_config("test-secret-key-for-jwt-signing-at-least-32-bytes").token_settings(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_password_config_defaults_match_hasher_defaults() {
        assert_eq!(
            PasswordConfig::default().hasher_settings(),
            HasherSettings::default()
        );
    }

    #[test]
    fn test_deserialize_from_toml_source() {
        let raw = r#"
            [server]
            http_port = 9000

            [database]
            url = "postgresql://localhost/identity"

            [jwt]
            issuer = "https://api.example.com"
            access_ttl_seconds = 600
            refresh_ttl_seconds = 86400
        "#;

        let config: Config = ConfigBuilder::builder()
            .add_source(File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.jwt.secret, "");
        assert_eq!(config.jwt.access_ttl_seconds, 600);
        assert_eq!(
            config.password.hasher_settings(),
            HasherSettings::default()
        );
    }

    #[test]
    fn test_environment_variables_are_read() {
        let variables = Map::from([
            (
                "JWT__SECRET".to_string(),
                "env-secret-value-at-least-32-bytes-long".to_string(),
            ),
            ("SERVER__HTTP_PORT".to_string(), "9100".to_string()),
            (
                "DATABASE__URL".to_string(),
                "postgresql://env-host/identity".to_string(),
            ),
            ("JWT__ISSUER".to_string(), "https://env.example.com".to_string()),
            ("JWT__ACCESS_TTL_SECONDS".to_string(), "300".to_string()),
            ("JWT__REFRESH_TTL_SECONDS".to_string(), "3600".to_string()),
        ]);

        let config = Config::load_with(environment().source(Some(variables)))
            .expect("Failed to load configuration");

        assert_eq!(config.jwt.secret, "env-secret-value-at-least-32-bytes-long");
        assert_eq!(config.server.http_port, 9100);
        assert_eq!(config.database.url, "postgresql://env-host/identity");
        assert_eq!(config.jwt.issuer, "https://env.example.com");
        assert_eq!(config.jwt.access_ttl_seconds, 300);
        assert!(TokenIssuer::new(config.jwt.token_settings()).is_ok());
    }
}
