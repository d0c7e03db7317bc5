//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_MAX_UPLOAD_MB, DEFAULT_REFRESH_TOKEN_EXPIRY,
    DEFAULT_UPLOAD_DIR, DEFAULT_UTC_OFFSET_HOURS,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Frontend origin allowed by CORS.
    pub web_url: String,
    pub upload_dir: String,
    pub max_upload_mb: usize,
    /// Offset used to decide what "today" is when filtering events.
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Seconds.
    pub access_token_expiry: i64,
    /// Seconds.
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "relawan-server")?
            .set_default("app.web_url", "http://localhost:3001")?
            .set_default("app.upload_dir", DEFAULT_UPLOAD_DIR)?
            .set_default("app.max_upload_mb", DEFAULT_MAX_UPLOAD_MB as i64)?
            .set_default("app.utc_offset_hours", DEFAULT_UTC_OFFSET_HOURS as i64)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("jwt.refresh_token_expiry", DEFAULT_REFRESH_TOKEN_EXPIRY)?
            .set_default("logging.format", "json")
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt.access_secret.is_empty() || self.jwt.refresh_secret.is_empty() {
            return Err(AppError::InvalidConfig(
                "jwt.access_secret and jwt.refresh_secret must be set".into(),
            ));
        }
        if self.jwt.access_secret == self.jwt.refresh_secret {
            return Err(AppError::InvalidConfig(
                "jwt.access_secret and jwt.refresh_secret must differ".into(),
            ));
        }
        if !(-12..=14).contains(&self.app.utc_offset_hours) {
            return Err(AppError::InvalidConfig(format!(
                "app.utc_offset_hours out of range: {}",
                self.app.utc_offset_hours
            )));
        }
        Ok(())
    }
}
