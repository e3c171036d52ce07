use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;
use users_api::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting users-api...");

    // 1. Configuration: .env, environment, then debug-build defaults
    let config = ConfigService::from_env().with_dev_defaults();
    let db_config =
        DatabaseConfig::load(&config).context("Failed to load database configuration")?;
    let server = ServerConfig::load(&config).context("Failed to load server configuration")?;

    // 2. Database: opened and pinged by its init hook, closed on shutdown
    let db = Arc::new(RwLock::new(Database::new(db_config)));
    let mut container = Container::new();
    container.register(db.read().await.clone());

    let mut app = Application::builder()
        .container(container)
        .register_lifecycle(Arc::clone(&db), "Database")
        .init_timeout(Duration::from_secs(30))
        .build()
        .await
        .context("Failed to initialize application")?;

    // 3. Feature modules
    UserModule::register(app.container_mut()).context("Failed to register UserModule")?;

    // 4. Serve until Ctrl+C / SIGTERM
    let router = users_api::app::router(app.container())?;
    let listener = tokio::net::TcpListener::bind(server.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", server.bind_addr()))?;

    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Initiating shutdown...");
    app.shutdown().await?;
    tracing::info!("Server stopped");
    Ok(())
}
