//! Domain models for Callpanel
//!
//! This module contains all the core domain models used throughout the application.

pub mod call_record;
pub mod extension;
pub mod summary;

pub use call_record::{CallRecord, Disposition, DIAL_APPLICATION};
pub use extension::{Extension, ExtensionProfile};
pub use summary::{percent_of, CallStatistics, DailySummary};
