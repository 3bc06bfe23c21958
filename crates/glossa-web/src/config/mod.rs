//! Configuration loading for Glossa.
//! Reads glossa.toml from the current directory or the path in GLOSSA_CONFIG,
//! then applies environment overrides (a `.env` file is honoured).

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_media_root")]
    pub media_root: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_media_root() -> String { "./media".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            media_root: default_media_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url()    -> String { "sqlite://data/glossa.db".to_string() }
fn default_max_connections() -> u32    { 5 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Credential for the administrative API. With no token configured every
/// admin request is refused.
#[derive(Debug, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default, deserialize_with = "deserialize_token")]
    pub api_token: Option<SecretString>,
}

impl AdminConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { api_token: non_empty_secret(token.into()) }
    }

    /// Whether `presented` equals the configured token.
    pub fn accepts(&self, presented: &str) -> bool {
        match &self.api_token {
            Some(token) => constant_time_eq(token.expose_secret().as_bytes(), presented.as_bytes()),
            None => false,
        }
    }
}

fn non_empty_secret(raw: String) -> Option<SecretString> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(SecretString::from(trimmed.to_string()))
    }
}

fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty_secret))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}


impl Config {
    /// Load configuration from glossa.toml.
    /// Checks GLOSSA_CONFIG env var first, then the current directory.
    /// A missing file is not an error: defaults are used.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("GLOSSA_CONFIG")
            .unwrap_or_else(|_| "glossa.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            tracing::warn!(path = %path, "config file not found, using defaults");
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply GLOSSA_DATABASE_URL, GLOSSA_ADMIN_TOKEN and GLOSSA_PORT from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GLOSSA_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(token) = lookup("GLOSSA_ADMIN_TOKEN") {
            self.admin.api_token = non_empty_secret(token);
        }
        if let Some(port) = lookup("GLOSSA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("GLOSSA_PORT is not a valid port: {port}"))?;
        }
        Ok(())
    }
}
