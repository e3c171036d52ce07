pub mod controller;
pub mod domain;
pub mod repository;
pub mod service;

pub use controller::UserController;
pub use domain::{UpdateUserRequest, User};
pub use repository::{MemoryUserRepository, PgUserRepository, UserRepository};
pub use service::UserService;

use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::module::Module;
use std::sync::Arc;

/// Wires repository, service and controller for `/api/users`.
pub struct UserModule;

impl UserModule {
    /// Register the module around an already-built repository.
    pub fn register_with(
        container: &mut Container,
        repository: Arc<dyn UserRepository>,
    ) -> Result<()> {
        // 1. Trait bindings
        container.provide_trait::<dyn UserRepository>(repository);

        // 2. Providers
        let service = UserService::inject(container)?;
        container.register(service);

        // 3. Controllers
        let controller = UserController::inject(container)?;
        container.register(controller);

        Ok(())
    }
}

impl Module for UserModule {
    /// Backs the module with Postgres. Requires a `Database` in the container.
    fn register(container: &mut Container) -> Result<()> {
        let repository = PgUserRepository::inject(container)?;
        Self::register_with(container, Arc::new(repository))
    }
}
