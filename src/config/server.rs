use super::ConfigService;
use crate::error::{AppError, Result};

pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8080";

/// Listening address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn load(config: &ConfigService) -> Result<Self> {
        let host = config.get(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = config.get(PORT).unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::InvalidConfig {
            key: PORT.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { host, port })
    }

    /// `host:port`, resolved by the listener at bind time.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
