//! System orchestration, startup, and shutdown logic.

pub mod catalog_system;
pub mod config;
pub mod tracing;

pub use self::catalog_system::*;
pub use self::config::*;
pub use self::tracing::*;
