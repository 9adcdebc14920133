//! Log record domain type.
//!
//! A `LogRecord` is immutable once constructed. The collection is loaded
//! once at startup and only ever read afterwards.

use super::identifiers::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Action =====

/// Action recorded in an audit log line.
///
/// Enumerates the actions the bundled dataset uses, with a fallback variant
/// so records from other sources survive a round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Session opened
    Login,
    /// Session closed
    Logout,
    /// Resource created
    Create,
    /// Resource modified
    Update,
    /// Resource removed
    Delete,
    /// Resource read
    View,
    /// Resource exported
    Export,
    /// Any other action name, kept verbatim
    Other(String),
}

impl Action {
    /// Parse an action name, wrapping unknown names in `Other`.
    pub fn parse(name: &str) -> Self {
        match name {
            "login" => Self::Login,
            "logout" => Self::Logout,
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "view" => Self::View,
            "export" => Self::Export,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::View => "view",
            Self::Export => "export",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Action> for String {
    fn from(value: Action) -> Self {
        value.as_str().to_string()
    }
}

// ===== LogRecord =====

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    user: UserId,
    action: Action,
    resource: String,
}

impl LogRecord {
    /// Create a record.
    pub fn new(
        timestamp: DateTime<Utc>,
        user: UserId,
        action: Action,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            user,
            action,
            resource: resource.into(),
        }
    }

    /// When the action happened.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Who performed the action.
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// What was done.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// What it was done to.
    pub fn resource(&self) -> &str {
        &self.resource
    }
}
