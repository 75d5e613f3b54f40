//! Caller identity and audit stamps carried by every persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity recorded when no caller header is present
pub const ANONYMOUS_CALLER: &str = "anonymous";

/// Who is performing a mutation. Passed explicitly into every mutating
/// storage and service call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_CALLER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

impl AuditStamp {
    pub fn new(caller: &CallerIdentity) -> Self {
        let now = Utc::now();
        Self {
            created_by: caller.to_string(),
            created_at: now,
            updated_by: caller.to_string(),
            updated_at: now,
        }
    }

    /// Record a modification by `caller`
    pub fn touch(&mut self, caller: &CallerIdentity) {
        self.updated_by = caller.to_string();
        self.updated_at = Utc::now();
    }
}
