use chrono::{DateTime, Utc};
use serde::Serialize;

/// State transition log entry
#[derive(Debug, Clone, Serialize)]
pub struct StateTransitionLog {
    pub from: String,
    pub to: String,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

impl StateTransitionLog {
    pub fn new(from: String, to: String, reason: String) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            reason,
        }
    }
}
