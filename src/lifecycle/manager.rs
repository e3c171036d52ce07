use super::{LifecycleError, OnModuleDestroy, OnModuleInit, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

struct LifecycleHook<T: ?Sized> {
    service: Arc<RwLock<T>>,
    name: String,
}

impl<T: ?Sized> LifecycleHook<T> {
    fn new(service: Arc<RwLock<T>>, name: impl Into<String>) -> Self {
        Self {
            service,
            name: name.into(),
        }
    }
}

/// Holds the registered hooks and runs them in the right order.
///
/// Init hooks run in registration order and stop at the first failure.
/// Destroy hooks run in reverse order and always all run.
#[derive(Default)]
pub struct LifecycleManager {
    on_init_hooks: Vec<LifecycleHook<dyn OnModuleInit>>,
    on_destroy_hooks: Vec<LifecycleHook<dyn OnModuleDestroy>>,
}

impl LifecycleManager {
    pub fn register_init<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleInit + 'static,
    {
        self.on_init_hooks.push(LifecycleHook::new(service, name));
    }

    pub fn register_destroy<T>(&mut self, service: Arc<RwLock<T>>, name: impl Into<String>)
    where
        T: OnModuleDestroy + 'static,
    {
        self.on_destroy_hooks.push(LifecycleHook::new(service, name));
    }

    pub async fn call_module_init(&self) -> Result<()> {
        tracing::info!("Calling OnModuleInit hooks...");

        for hook in &self.on_init_hooks {
            tracing::debug!("Initializing: {}", hook.name);
            let mut service = hook.service.write().await;
            service.on_module_init().await.map_err(|e| {
                tracing::error!("OnModuleInit failed for {}: {}", hook.name, e);
                LifecycleError::hook_failed(&hook.name, e.to_string())
            })?;
            tracing::debug!("Initialized: {}", hook.name);
        }

        tracing::info!(
            "OnModuleInit complete ({} hooks executed)",
            self.on_init_hooks.len()
        );
        Ok(())
    }

    pub async fn call_module_init_with_timeout(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.call_module_init())
            .await
            .map_err(|_| {
                LifecycleError::timeout("OnModuleInit", format!("Timeout after {:?}", timeout))
            })?
    }

    pub async fn call_module_destroy(&self) -> Result<()> {
        tracing::info!("Calling OnModuleDestroy hooks...");

        for hook in self.on_destroy_hooks.iter().rev() {
            tracing::debug!("Destroying: {}", hook.name);
            let mut service = hook.service.write().await;
            if let Err(e) = service.on_module_destroy().await {
                tracing::error!("OnModuleDestroy failed for {}: {}", hook.name, e);
            }
        }

        tracing::info!(
            "OnModuleDestroy complete ({} hooks executed)",
            self.on_destroy_hooks.len()
        );
        Ok(())
    }
}
