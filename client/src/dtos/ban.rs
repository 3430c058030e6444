use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanTarget {
    User,
    Server,
}

/// One ban entry. User and server bans share this shape; `is_active`
/// distinguishes current bans from lifted ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanEntry {
    pub id: String,
    pub target_id: String,
    pub target_type: BanTarget,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub banned_by: Option<String>,
    #[serde(default)]
    pub banned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub unbanned_by: Option<String>,
    #[serde(default)]
    pub unbanned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct BanList {
    pub bans: Vec<BanEntry>,
}
