//! Extension model
//!
//! An extension is the phone-line identity agents log in with.

use serde::{Deserialize, Serialize};

/// Registry row of the `extensions` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Unique identifier
    pub id: i32,

    /// Extension number (login identifier)
    pub number: String,

    /// Whether logins are refused for this extension
    pub blocked: bool,

    /// Display name
    pub name: String,

    /// Caller ID presented on outbound calls
    pub caller_id: Option<String>,

    /// Registration status reported by the PBX
    pub status: Option<String>,

    /// Synchronization status
    pub sny_status: Option<String>,

    /// Agent status (available, paused, ...)
    pub agent_status: Option<String>,
}

impl Extension {
    /// Check if the extension may open a session
    #[inline]
    pub fn can_login(&self) -> bool {
        !self.blocked
    }

    /// Public projection of the extension
    pub fn profile(&self) -> ExtensionProfile {
        ExtensionProfile::from(self)
    }
}

/// Extension information safe to hand to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionProfile {
    pub number: String,
    pub name: String,
    pub caller_id: Option<String>,
    pub status: Option<String>,
    pub sny_status: Option<String>,
    pub agent_status: Option<String>,
}

impl From<&Extension> for ExtensionProfile {
    fn from(extension: &Extension) -> Self {
        Self {
            number: extension.number.clone(),
            name: extension.name.clone(),
            caller_id: extension.caller_id.clone(),
            status: extension.status.clone(),
            sny_status: extension.sny_status.clone(),
            agent_status: extension.agent_status.clone(),
        }
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self {
            id: 0,
            number: String::new(),
            blocked: false,
            name: String::new(),
            caller_id: None,
            status: None,
            sny_status: None,
            agent_status: None,
        }
    }
}
