use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// One year.
const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;
/// Ten years.
const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
    /// Deployment platform; destructive admin endpoints only run on `dev`.
    pub platform: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Directory served under `/app`.
    pub static_dir: String,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_days: i64,
}

#[derive(Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

impl JwtConfig {
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.access_token_ttl_seconds)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_token_ttl_days)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .finish()
    }
}

impl fmt::Debug for PolkaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolkaConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, POLKA__API_KEY, PLATFORM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Fails when the signing secret or the webhook API key is empty, or when a
    /// token lifetime is not positive or exceeds its cap.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("platform", "prod")?
            .set_default("server.http_port", 8080)?
            .set_default("server.static_dir", ".")?
            .set_default("jwt.access_token_ttl_seconds", 3600)?
            .set_default("jwt.refresh_token_ttl_days", 60)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must be set".to_string()));
        }
        if self.polka.api_key.is_empty() {
            return Err(ConfigError::Message(
                "polka.api_key must be set".to_string(),
            ));
        }
        if self.jwt.access_token_ttl_seconds <= 0 || self.jwt.refresh_token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "token lifetimes must be positive".to_string(),
            ));
        }
        if self.jwt.access_token_ttl_seconds > MAX_ACCESS_TOKEN_TTL_SECONDS
            || self.jwt.refresh_token_ttl_days > MAX_REFRESH_TOKEN_TTL_DAYS
        {
            return Err(ConfigError::Message(format!(
                "token lifetimes are capped at {} seconds (access) and {} days (refresh)",
                MAX_ACCESS_TOKEN_TTL_SECONDS,
                MAX_REFRESH_TOKEN_TTL_DAYS
            )));
        }
        Ok(())
    }
}
