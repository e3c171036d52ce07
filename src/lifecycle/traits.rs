use super::LifecycleError;
use async_trait::async_trait;

/// Runs once before the server starts accepting requests.
///
/// A failure here aborts startup.
///
/// ```rust,ignore
/// #[async_trait]
/// impl OnModuleInit for Database {
///     async fn on_module_init(&mut self) -> Result<(), LifecycleError> {
///         self.open().await.map_err(|e| LifecycleError::init_failed(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait OnModuleInit: Send + Sync {
    async fn on_module_init(&mut self) -> Result<(), LifecycleError>;
}

/// Runs once after the server has stopped.
///
/// Services are destroyed in reverse order of registration. A failure is
/// logged and does not stop the remaining hooks.
#[async_trait]
pub trait OnModuleDestroy: Send + Sync {
    async fn on_module_destroy(&mut self) -> Result<(), LifecycleError>;
}
