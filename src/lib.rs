//! # users-api
//!
//! A small HTTP API over one Postgres table of users.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/api/users` | 200, one `ID: .., Name: .., Height: .., Age: ..` line per row |
//! | GET | `/api/users/{id}` | 200, zero or one such line |
//! | POST | `/api/users` | 201, JSON echo of the submitted user |
//! | PUT | `/api/users/{id}` | 200, `WORKED!` |
//! | DELETE | `/api/users/{id}` | 200, `WORKED!` |
//!
//! Reads switch to a JSON envelope when the request sends
//! `Accept: application/json`.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use users_api::prelude::*;
//! use users_api::modules::user::MemoryUserRepository;
//!
//! # fn main() -> users_api::Result<()> {
//! let mut container = Container::new();
//! UserModule::register_with(&mut container, Arc::new(MemoryUserRepository::new()))?;
//! let router = users_api::app::router(&container)?;
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod common;
pub mod config;
pub mod di;
pub mod error;
pub mod infrastructure;
pub mod lifecycle;
pub mod module;
pub mod modules;

pub use common::ApiResponse;
pub use di::{Container, Injectable};
pub use error::{AppError, Result};
pub use module::Module;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::common::{ApiResponse, ResponseFormat};
    pub use crate::config::{ConfigService, DatabaseConfig, ServerConfig};
    pub use crate::di::{Container, Injectable};
    pub use crate::error::{AppError, Result};
    pub use crate::infrastructure::Database;
    pub use crate::lifecycle::{
        Application, ApplicationBuilder, LifecycleError, OnModuleDestroy, OnModuleInit,
        shutdown_signal,
    };
    pub use crate::module::Module;
    pub use crate::modules::user::{UserController, UserModule, UserRepository, UserService};
    pub use std::sync::Arc;
}
