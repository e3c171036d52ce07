//! Lifecycle hooks
//!
//! Services holding external resources register here so they are opened
//! before the server binds and released after it stops.
//!
//! ```text
//! 1. Configuration loading
//!    ↓
//! 2. Container creation
//!    ↓
//! 3. OnModuleInit (registration order)   ← connect + ping
//!    ↓
//! 4. Module registration, server start
//!    ↓
//! [Serving...]
//!    ↓
//! 5. Shutdown signal (SIGTERM/SIGINT)
//!    ↓
//! 6. OnModuleDestroy (reverse order)     ← close
//! ```

mod application;
mod error;
mod manager;
mod shutdown;
mod traits;

pub use application::{Application, ApplicationBuilder};
pub use error::{LifecycleError, Result};
pub use manager::LifecycleManager;
pub use shutdown::shutdown_signal;
pub use traits::{OnModuleDestroy, OnModuleInit};
