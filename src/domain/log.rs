//! Gateway action log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged gateway action, as stored in the log document store.
///
/// Entries are written once by the gateway pipeline and never updated in
/// place; retention jobs delete them. The console only reads this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Store-assigned identifier, absent until the document is persisted
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Logical key of the proxied action
    pub key: String,
    /// Whether the upstream call succeeded
    pub success: bool,
    /// Upstream duration in milliseconds
    pub milliseconds: f64,
    /// Completion time (UTC)
    pub action_time: DateTime<Utc>,
}

impl LogRecord {
    /// Build an unpersisted record stamped with the current time
    pub fn new(key: impl Into<String>, success: bool, milliseconds: f64) -> Self {
        Self {
            id: None,
            key: key.into(),
            success,
            milliseconds,
            action_time: Utc::now(),
        }
    }
}
