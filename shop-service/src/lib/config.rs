use std::env;

use chrono::Duration;
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
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

/// Account promoted to `ADMIN` at startup when it does not exist yet.
#[derive(Deserialize, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_minutes() -> i64 {
    15
}

impl JwtConfig {
    /// Longest accepted token lifetime: one week.
    pub const MAX_EXPIRATION_MINUTES: i64 = 7 * 24 * 60;

    /// Token lifetime; only meaningful after [`Config::load`] validated it.
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.expiration_minutes)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=Self::MAX_EXPIRATION_MINUTES).contains(&self.expiration_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_MINUTES,
                self.expiration_minutes
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__EXPIRATION_MINUTES=30 overrides jwt.expiration_minutes
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_configuration(configuration)
    }

    fn from_configuration(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Self = configuration.try_deserialize()?;
        config.jwt.validate()?;
        Ok(config)
    }
}
