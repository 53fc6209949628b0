//! Callpanel Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Callpanel call-center dashboard. It includes:
//!
//! - Domain models (CallRecord, DailySummary, Extension)
//! - Store traits for call records and the extension registry
//! - Calendar helpers bound to a single configured timezone
//! - Duration and date-time formatters
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod calendar;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
