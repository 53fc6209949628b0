//! Store implementations
//!
//! Concrete implementations of the store traits defined in callpanel-core,
//! using sqlx for PostgreSQL access.

pub mod cdr_repo;
pub mod extension_repo;

pub use cdr_repo::PgCallRecordStore;
pub use extension_repo::PgExtensionDirectory;
