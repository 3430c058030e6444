use serde::Deserialize;

/// Generic acknowledgement for ban/unban and key-deletion calls.
#[derive(Debug, Deserialize)]
pub struct ActionReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope most read endpoints use: `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
