//! Typed service configuration, loaded from the environment.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub images: ImageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Base URL the stored public image paths are appended to.
    pub source_base_url: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid SERVER_PORT `{raw}`"))?,
            Err(_) => 8000,
        };

        let url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set")?;
        let source_base_url = std::env::var("IMAGE_SOURCE_URL")
            .context("IMAGE_SOURCE_URL must be set")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let token_ttl_secs = match std::env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("invalid TOKEN_TTL_SECS `{raw}`"))?,
            Err(_) => 86_400,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig { url },
            images: ImageConfig { source_base_url },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_secs,
            },
        })
    }
}
