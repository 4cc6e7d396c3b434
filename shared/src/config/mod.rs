//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and session cookie configuration
//! - `environment` - Environment detection and logging configuration
//! - `firestore` - Document store selection and location
//! - `server` - HTTP bind address and CORS configuration
//!
//! The whole tree is read once at startup from a YAML file, with
//! `PROFILE__`-prefixed environment variables layered on top
//! (`PROFILE__AUTH__JWT__SECRET` overrides `auth.jwt.secret`).

pub mod auth;
pub mod environment;
pub mod firestore;
pub mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, SameSitePolicy, SessionConfig};
pub use environment::{Environment, LoggingConfig};
pub use firestore::{FirestoreConfig, StorageBackend};
pub use server::CorsConfig;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "PROFILE_CONFIG_PATH";

/// Configuration file used when `PROFILE_CONFIG_PATH` is unset
pub const DEFAULT_CONFIG_PATH: &str = "../secrets/config.yaml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PROFILE";

/// Configuration loading errors. Both are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Bind host
    #[serde(default = "server::default_host")]
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Profile store backend
    #[serde(default)]
    pub storage: StorageBackend,

    /// Firestore configuration (required for the Firestore backend)
    #[serde(default)]
    pub firestore: Option<FirestoreConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the path in `PROFILE_CONFIG_PATH`,
    /// or [`DEFAULT_CONFIG_PATH`]
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Load and validate configuration from a YAML file plus environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Yaml)
                    .required(true),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements the type system cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }

        let secret = &self.auth.jwt.secret;
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt.secret must not be empty".to_string()));
        }
        if self.environment.is_production() && secret.len() < auth::MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt.secret must be at least {} bytes in production",
                auth::MIN_PRODUCTION_SECRET_LEN
            )));
        }
        let token_expiry = self.auth.jwt.token_expiry;
        if token_expiry <= 0 || token_expiry > auth::MAX_TOKEN_EXPIRY_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt.token_expiry must be between 1 and {} seconds",
                auth::MAX_TOKEN_EXPIRY_SECONDS
            )));
        }
        if self.auth.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.session.cookie_name must not be empty".to_string()));
        }

        if self.storage == StorageBackend::Firestore {
            let firestore = self.firestore.as_ref().ok_or_else(|| {
                ConfigError::Invalid("firestore section is required for the firestore backend".to_string())
            })?;
            if firestore.project_id.trim().is_empty() {
                return Err(ConfigError::Invalid("firestore.project_id must not be empty".to_string()));
            }
            if firestore.credentials.is_none() && firestore.resolved_emulator_host().is_none() {
                return Err(ConfigError::Invalid(
                    "firestore.credentials is required unless an emulator host is configured".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ps-config-{}-{}.yaml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_minimal_yaml() {
        let path = write_config(
            "minimal",
            r#"
port: 8080
firestore:
  project_id: demo-project
  credentials: ./sa.json
auth:
  jwt:
    secret: test-secret
"#,
        );

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.storage, StorageBackend::Firestore);
        let firestore = config.firestore.as_ref().unwrap();
        assert_eq!(firestore.project_id, "demo-project");
        assert_eq!(firestore.collection, "profiles");
        assert_eq!(firestore.document_id, "default");
        assert_eq!(config.auth.jwt.token_expiry, 3600);
        assert_eq!(config.auth.session.cookie_name, "auth_token");
        assert!(!config.auth.allow_token_issuance);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = AppConfig::load("/nonexistent/profile-config.yaml");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let path = write_config("malformed", "port: [not, a, port\nauth: {");
        assert!(AppConfig::load(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_firestore_backend_requires_section() {
        let path = write_config(
            "no-firestore",
            r#"
port: 8080
auth:
  jwt:
    secret: test-secret
"#,
        );
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_memory_backend_without_firestore() {
        let path = write_config(
            "memory",
            r#"
port: 9090
storage: memory
auth:
  jwt:
    secret: test-secret
  allow_token_issuance: true
  session:
    cookie_name: session
    same_site: strict
"#,
        );
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.auth.allow_token_issuance);
        assert_eq!(config.auth.session.cookie_name, "session");
        assert_eq!(config.auth.session.same_site, SameSitePolicy::Strict);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config.example.yaml");
        let config = AppConfig::load(path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.session.same_site, SameSitePolicy::Lax);
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_production_requires_long_secret() {
        let mut config = AppConfig {
            environment: Environment::Production,
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            firestore: None,
            auth: AuthConfig::new(JwtConfig::new("short")),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        };
        assert!(config.validate().is_err());

        config.auth.jwt.secret = "x".repeat(auth::MIN_PRODUCTION_SECRET_LEN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_expiry_bounds() {
        let mut config = AppConfig {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            firestore: None,
            auth: AuthConfig::new(JwtConfig::new("test-secret")),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        };

        for expiry in [0, -1, auth::MAX_TOKEN_EXPIRY_SECONDS + 1, i64::MAX / 2] {
            config.auth.jwt.token_expiry = expiry;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "token_expiry {} accepted",
                expiry
            );
        }

        config.auth.jwt.token_expiry = auth::MAX_TOKEN_EXPIRY_SECONDS;
        assert!(config.validate().is_ok());
    }
}
