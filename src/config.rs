use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_NAME: &str = "esports";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOST is not in the correct format: {0}")]
    Host(String),
    #[error("PORT is not the correct format: {0}")]
    Port(String),
}

/// Service settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Host(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Port(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            database_name: lookup("DATABASE_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Whether a variable is set, without exposing its value.
pub fn is_set(key: &str) -> bool {
    std::env::var_os(key).is_some_and(|value| !value.is_empty())
}
