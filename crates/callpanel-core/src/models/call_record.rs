//! Call record model
//!
//! One row of the PBX `cdr` table, as seen by the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Last application name the PBX reports while a call is still dialing
pub const DIAL_APPLICATION: &str = "Dial";

/// Outcome code of a call attempt
///
/// Only `ANSWERED` is meaningful to the dashboard; every other code is kept
/// verbatim and counts as not answered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Disposition {
    /// The call was picked up
    Answered,
    /// Any other outcome (`NO ANSWER`, `BUSY`, `FAILED`, ...)
    Other(String),
}

impl Disposition {
    /// Parse a raw store value; empty strings mean "no disposition yet"
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(Self::from(code.to_string())),
        }
    }

    /// Raw code as stored by the PBX
    pub fn as_str(&self) -> &str {
        match self {
            Disposition::Answered => "ANSWERED",
            Disposition::Other(code) => code,
        }
    }

    #[inline]
    pub fn is_answered(&self) -> bool {
        matches!(self, Disposition::Answered)
    }
}

impl From<String> for Disposition {
    fn from(code: String) -> Self {
        if code == "ANSWERED" {
            Disposition::Answered
        } else {
            Disposition::Other(code)
        }
    }
}

/// Field deserializer applying the same empty-means-absent rule as `from_raw`
fn deserialize_disposition<'de, D>(deserializer: D) -> Result<Option<Disposition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(Disposition::from_raw(raw.as_deref()))
}

impl From<Disposition> for String {
    fn from(disposition: Disposition) -> Self {
        match disposition {
            Disposition::Answered => "ANSWERED".to_string(),
            Disposition::Other(code) => code,
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call Data Record
///
/// Produced by the PBX and read-only from the dashboard's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Unique identifier (PBX `uniqueid`)
    pub id: String,

    /// Call start timestamp
    pub timestamp: DateTime<Utc>,

    /// Originating extension or number
    pub source: String,

    /// Dialed number
    pub destination: String,

    /// Talk duration in seconds (absent if never connected)
    pub duration_seconds: Option<i64>,

    /// Outcome; absent while the call is in progress
    #[serde(default, deserialize_with = "deserialize_disposition")]
    pub disposition: Option<Disposition>,

    /// Last processing step reported by the PBX
    pub last_application: String,

    /// Free-form annotation set by the dialplan
    pub user_field: Option<String>,
}

impl CallRecord {
    /// Check if the call was answered
    #[inline]
    pub fn is_answered(&self) -> bool {
        self.disposition.as_ref().is_some_and(Disposition::is_answered)
    }

    /// Check if the call looks in progress
    ///
    /// Inferred from `lastapp == "Dial"` with no disposition; the PBX gives
    /// no live confirmation of this state.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.last_application == DIAL_APPLICATION && self.disposition.is_none()
    }

    /// Talk duration, 0 when absent or negative
    #[inline]
    pub fn duration(&self) -> i64 {
        self.duration_seconds.unwrap_or(0).max(0)
    }
}

impl Default for CallRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            timestamp: Utc::now(),
            source: String::new(),
            destination: String::new(),
            duration_seconds: None,
            disposition: None,
            last_application: String::new(),
            user_field: None,
        }
    }
}
