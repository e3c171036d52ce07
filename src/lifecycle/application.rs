use super::{LifecycleError, LifecycleManager, OnModuleDestroy, OnModuleInit, Result};
use crate::di::Container;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// An initialized application: its container plus the hooks to tear it down.
///
/// ```rust,ignore
/// let app = Application::builder()
///     .container(container)
///     .register_lifecycle(Arc::clone(&db), "Database")
///     .init_timeout(Duration::from_secs(30))
///     .build()
///     .await?;
///
/// // serve...
///
/// app.shutdown().await?;
/// ```
pub struct Application {
    container: Container,
    lifecycle_manager: LifecycleManager,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mutable access for registering modules once resources are open.
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Run the destroy hooks.
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down application...");
        self.lifecycle_manager.call_module_destroy().await?;
        tracing::info!("Application shutdown complete");
        Ok(())
    }
}

#[derive(Default)]
pub struct ApplicationBuilder {
    container: Option<Container>,
    lifecycle_manager: LifecycleManager,
    init_timeout: Option<Duration>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }

    /// Register a service for both init and destroy hooks.
    pub fn register_lifecycle<T>(
        mut self,
        service: Arc<RwLock<T>>,
        name: impl Into<String>,
    ) -> Self
    where
        T: OnModuleInit + OnModuleDestroy + 'static,
    {
        let name = name.into();
        self.lifecycle_manager.register_init(Arc::clone(&service), name.clone());
        self.lifecycle_manager.register_destroy(service, name);
        self
    }

    /// Run every init hook and return the ready application.
    ///
    /// # Errors
    ///
    /// Fails if no container was supplied, if any init hook fails, or if the
    /// hooks exceed the init timeout.
    pub async fn build(self) -> Result<Application> {
        let container = self
            .container
            .ok_or_else(|| LifecycleError::init_failed("Container not provided"))?;

        tracing::info!("Starting application initialization...");

        match self.init_timeout {
            Some(timeout) => {
                self.lifecycle_manager
                    .call_module_init_with_timeout(timeout)
                    .await?
            }
            None => self.lifecycle_manager.call_module_init().await?,
        }

        tracing::info!("Application initialization complete");

        Ok(Application {
            container,
            lifecycle_manager: self.lifecycle_manager,
        })
    }
}
