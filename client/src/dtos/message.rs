use serde::{Deserialize, Serialize};

/// One per-server mirror of a logical message. Any `message_id` in the list
/// can be used to look the canonical record up again; the resolution is
/// owned by the upstream admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    pub guild_id: String,
    pub message_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInfo {
    pub original_message_id: String,
    pub content: String,
    pub author: String,
    pub server_messages: Vec<ServerMessage>,
    pub total_servers: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildError {
    pub guild_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageData {
    pub original_message_id: String,
    pub total_servers: u32,
    pub success_count: u32,
    pub failed_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GuildError>>,
}

/// Per-server deletion report from the upstream, including partial
/// failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMessageResponse {
    pub status: String,
    pub message: String,
    pub data: DeleteMessageData,
}

/// 202 body from the gateway when the delete call timed out or the
/// connection dropped: the deletion may have happened anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWarning {
    pub status: String,
    pub message: String,
    pub error: String,
    pub suggestion: String,
}

/// Outcome of a delete-everywhere request as the operator should see it.
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    Completed(DeleteMessageResponse),
    Uncertain(DeleteWarning),
}
