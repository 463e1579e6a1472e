use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of the mark-read request. Messages are never created or edited from
/// the back office otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub is_read: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactTab {
    #[default]
    All,
    Unread,
    Read,
}
