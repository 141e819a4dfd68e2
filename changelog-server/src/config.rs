use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, loaded from `CHANGELOG_*` environment variables.
///
/// | Env Var          | Default           |
/// |------------------|-------------------|
/// | `CHANGELOG_HOST` | `0.0.0.0`         |
/// | `CHANGELOG_PORT` | `8000`            |
/// | `CHANGELOG_DB`   | `./changelogs.db` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            db_path: PathBuf::from("./changelogs.db"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("CHANGELOG_HOST").unwrap_or(defaults.host);

        let port = match std::env::var("CHANGELOG_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("CHANGELOG_PORT must be a valid port, got {:?}", raw))?,
            Err(_) => defaults.port,
        };

        let db_path = std::env::var("CHANGELOG_DB")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        Ok(Self {
            host,
            port,
            db_path,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
