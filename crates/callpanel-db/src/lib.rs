//! Callpanel Database Layer
//!
//! This crate provides PostgreSQL access to the PBX tables the dashboard
//! reads. It includes:
//!
//! - Connection pool management with sqlx
//! - `CallRecordStore` over the `cdr` table
//! - `ExtensionDirectory` over the `extensions` table

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use callpanel_core::{AppError, AppResult};
pub use sqlx::PgPool;
