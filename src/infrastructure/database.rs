use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};
use crate::lifecycle::{LifecycleError, OnModuleDestroy, OnModuleInit};
use async_trait::async_trait;
use sea_orm::sqlx::postgres::PgPoolOptions;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// The process-wide Postgres handle.
///
/// Cloning shares the same underlying slot, so the copy registered in the
/// container sees the connection opened by the lifecycle hook.
#[derive(Clone)]
pub struct Database {
    config: DatabaseConfig,
    acquire_timeout: Duration,
    connection: Arc<RwLock<Option<DatabaseConnection>>>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            connection: Arc::new(RwLock::new(None)),
        }
    }

    /// How long startup waits for the first connection before giving up.
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// A handle to the open connection.
    ///
    /// Fails with [`AppError::NotConnected`] before init or after close.
    pub async fn connection(&self) -> Result<DatabaseConnection> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or(AppError::NotConnected)
    }

    async fn open(&self) -> Result<DatabaseConnection> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(self.acquire_timeout)
            .connect_with(self.config.connect_options())
            .await?;

        let conn = SqlxPostgresConnector::from_sqlx_postgres_pool(pool);
        conn.ping().await?;
        Ok(conn)
    }
}

#[async_trait]
impl OnModuleInit for Database {
    async fn on_module_init(&mut self) -> std::result::Result<(), LifecycleError> {
        tracing::info!(
            "Database: connecting to {}:{}/{}",
            self.config.host,
            self.config.port,
            self.config.name
        );

        let conn = self
            .open()
            .await
            .map_err(|e| LifecycleError::init_failed(e.to_string()))?;
        *self.connection.write().await = Some(conn);

        tracing::info!("Database: connection verified");
        Ok(())
    }
}

#[async_trait]
impl OnModuleDestroy for Database {
    async fn on_module_destroy(&mut self) -> std::result::Result<(), LifecycleError> {
        let Some(conn) = self.connection.write().await.take() else {
            return Ok(());
        };

        tracing::info!("Database: closing connection");
        conn.close()
            .await
            .map_err(|e| LifecycleError::shutdown_failed(e.to_string()))?;
        tracing::info!("Database: connection closed");
        Ok(())
    }
}
