use crate::error::{AppError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type Instance = Arc<dyn Any + Send + Sync>;

/// Thread-safe, type-keyed service registry.
///
/// Concrete services are stored as `Arc<T>`. Trait objects are stored as an
/// `Arc<Arc<dyn Trait>>` keyed by the trait's `TypeId`, which lets
/// `resolve_trait` hand back a clone of the inner `Arc<dyn Trait>`.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, Instance>,
    traits: DashMap<TypeId, Instance>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_arc(Arc::new(instance))
    }

    /// Register a value that is already shared with other owners.
    pub fn register_arc<T: 'static + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), instance);
        self
    }

    /// Make `implementation` the answer for `resolve_trait::<Trait>()`.
    pub fn provide_trait<Trait>(&mut self, implementation: Arc<Trait>) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
    {
        self.traits
            .insert(TypeId::of::<Trait>(), Arc::new(implementation));
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| not_found::<T>())?;
        entry
            .value()
            .clone()
            .downcast::<T>()
            .map_err(|_| downcast_failed::<T>())
    }

    pub fn resolve_trait<Trait>(&self) -> Result<Arc<Trait>>
    where
        Trait: ?Sized + 'static + Send + Sync,
    {
        let entry = self
            .traits
            .get(&TypeId::of::<Trait>())
            .ok_or_else(|| not_found::<Trait>())?;
        let wrapper = entry
            .value()
            .clone()
            .downcast::<Arc<Trait>>()
            .map_err(|_| downcast_failed::<Trait>())?;
        Ok(wrapper.as_ref().clone())
    }
}

fn not_found<T: ?Sized>() -> AppError {
    AppError::DependencyNotFound {
        type_name: std::any::type_name::<T>().to_string(),
    }
}

fn downcast_failed<T: ?Sized>() -> AppError {
    AppError::DowncastFailed {
        type_name: std::any::type_name::<T>().to_string(),
    }
}
