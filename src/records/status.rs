use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Legal status attached to a crew member's criminal record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityStatus {
    #[default]
    None,
    Suspected,
    Wanted,
    Detained,
    Paroled,
    Discharged,
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityStatus::None => write!(f, "NONE"),
            SecurityStatus::Suspected => write!(f, "SUSPECTED"),
            SecurityStatus::Wanted => write!(f, "WANTED"),
            SecurityStatus::Detained => write!(f, "DETAINED"),
            SecurityStatus::Paroled => write!(f, "PAROLED"),
            SecurityStatus::Discharged => write!(f, "DISCHARGED"),
        }
    }
}

/// One accepted status change, kept in the record's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: SecurityStatus,
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

/// The criminal part of a personnel record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriminalRecord {
    #[serde(default)]
    pub status: SecurityStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub history: Vec<StatusChange>,
}

impl CriminalRecord {
    pub fn with_status(status: SecurityStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Apply a status change. Returns `false` and leaves the record untouched
    /// when it already carries `status`.
    pub fn change_status(&mut self, status: SecurityStatus, reason: Option<String>) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.reason = reason.clone();
        self.history.push(StatusChange {
            status,
            reason,
            at: Utc::now(),
        });
        true
    }
}
