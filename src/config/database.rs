use super::ConfigService;
use crate::error::{AppError, Result};
use sea_orm::sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;

pub const DB_HOST: &str = "DBHOST";
pub const DB_PORT: &str = "DBPORT";
pub const DB_USER: &str = "DBUSER";
pub const DB_PASS: &str = "DBPASS";
pub const DB_NAME: &str = "DBNAME";

/// Connection parameters for the Postgres store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Read all five connection keys. The first missing key aborts the load.
    pub fn load(config: &ConfigService) -> Result<Self> {
        let host = config.require(DB_HOST)?;
        let port = config.require(DB_PORT)?;
        let user = config.require(DB_USER)?;
        let password = config.require(DB_PASS)?;
        let name = config.require(DB_NAME)?;

        let port = port.parse::<u16>().map_err(|e| AppError::InvalidConfig {
            key: DB_PORT.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            host,
            port,
            user,
            password,
            name,
        })
    }

    /// Driver options for this database, with TLS disabled.
    ///
    /// Values are handed over field by field, so credentials and hosts
    /// (including IPv6 literals) need no escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED_KEYS: [&str; 5] = [DB_HOST, DB_PORT, DB_USER, DB_PASS, DB_NAME];

    fn full_config() -> ConfigService {
        let config = ConfigService::default();
        config.set(DB_HOST, "127.0.0.1");
        config.set(DB_PORT, "5432");
        config.set(DB_USER, "joao");
        config.set(DB_PASS, "123456789");
        config.set(DB_NAME, "users");
        config
    }

    #[test]
    fn test_load_reads_all_keys() {
        let db = DatabaseConfig::load(&full_config()).unwrap();
        assert_eq!(db.host, "127.0.0.1");
        assert_eq!(db.port, 5432);
        assert_eq!(db.user, "joao");
        assert_eq!(db.password, "123456789");
        assert_eq!(db.name, "users");
    }

    #[test]
    fn test_each_missing_key_fails_the_load() {
        for missing in REQUIRED_KEYS {
            let config = ConfigService::default();
            for key in REQUIRED_KEYS.iter().filter(|k| **k != missing) {
                config.set(key, "5432");
            }

            match DatabaseConfig::load(&config) {
                Err(AppError::MissingConfig { key }) => assert_eq!(key, missing),
                other => panic!("expected missing {}, got {:?}", missing, other),
            }
        }
    }

    #[test]
    fn test_non_numeric_port_is_invalid() {
        let config = full_config();
        config.set(DB_PORT, "postgres");
        assert!(matches!(
            DatabaseConfig::load(&config),
            Err(AppError::InvalidConfig { ref key, .. }) if key == DB_PORT
        ));
    }

    #[test]
    fn test_connect_options_disable_tls() {
        let options = DatabaseConfig::load(&full_config()).unwrap().connect_options();
        assert_eq!(options.get_host(), "127.0.0.1");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "joao");
        assert_eq!(options.get_database(), Some("users"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Disable));
    }

    #[test]
    fn test_connect_options_take_raw_values() {
        let config = full_config();
        config.set(DB_HOST, "::1");
        config.set(DB_USER, "app user");
        config.set(DB_PASS, "p@ss:w/rd");

        let options = DatabaseConfig::load(&config).unwrap().connect_options();
        assert_eq!(options.get_host(), "::1");
        assert_eq!(options.get_username(), "app user");
    }

    #[test]
    fn test_debug_redacts_password() {
        let db = DatabaseConfig::load(&full_config()).unwrap();
        let rendered = format!("{:?}", db);
        assert!(!rendered.contains("123456789"));
        assert!(rendered.contains("***"));
    }
}
