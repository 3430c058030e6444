use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API key metadata as the admin API reports it. The key plaintext is never
/// part of this shape; it exists only in [`CreatedApiKey`] at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub permissions: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyList {
    pub api_keys: Vec<ApiKey>,
}

/// Creation payload. `api_key` is the one-time plaintext; it is shown once
/// and never returned by any listing afterwards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedApiKey {
    pub api_key: String,
    pub key_id: String,
    pub name: String,
    pub permissions: Vec<String>,
    pub warning: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateKeyResponse {
    pub status: String,
    pub message: String,
    pub data: CreatedApiKey,
}
