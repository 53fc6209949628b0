//! Data Transfer Objects (DTOs) for API requests and responses

pub mod auth;
pub mod call;
pub mod common;
pub mod dashboard;
pub mod stats;
pub mod summary;

pub use auth::*;
pub use call::*;
pub use common::*;
pub use dashboard::*;
pub use stats::*;
pub use summary::*;
