//! A logged touchpoint (call/meeting/email) with a customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An interaction record. `kind` is a free-text label such as "call",
/// "meeting", or "email"; `occurred_at` defaults to record-creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub customer_id: i64,
    pub kind: String,
    pub occurred_at: DateTime<Utc>,
    pub notes: Option<String>,
}
