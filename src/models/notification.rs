use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Cuerpo del PATCH `/api/notifications/{id}/`
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct ReadFlagUpdate {
    pub is_read: bool,
}
