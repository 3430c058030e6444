use common::error::{AppError, Res};
use log::info;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::credential::CredentialStore;
use crate::dtos::ban::{BanEntry, BanList, BanTarget};
use crate::dtos::key::{ApiKey, ApiKeyList, CreateKeyResponse};
use crate::dtos::message::{DeleteOutcome, MessageInfo};
use crate::dtos::metrics::{ApiKeyMetrics, MetricsData};
use crate::dtos::reply::{ActionReply, DataEnvelope};

/// Operator-side client for the dashboard gateway (`/api/dash`).
///
/// Attaches the stored credential as a bearer token on every call and
/// raises a uniform `Upstream` error for non-success responses, carrying
/// the gateway-supplied message when one is present. Never retries.
pub struct DashClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl DashClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        DashClient {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    pub fn from_store(base_url: String, store: &CredentialStore) -> Self {
        Self::new(base_url, store.get().map(str::to_owned))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Res<reqwest::Response> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        Ok(request.send().await?)
    }

    async fn reject(response: reqwest::Response) -> AppError {
        let status = response.status();
        let error_body = response.json::<Value>().await.unwrap_or(Value::Null);
        let message = error_body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| {
                format!(
                    "API Error: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                )
            });
        AppError::Upstream(message)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Res<T> {
        let response = self.send(method, path, body).await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    // === API key management ===

    pub async fn list_api_keys(&self) -> Res<Vec<ApiKey>> {
        let res: DataEnvelope<ApiKeyList> = self.request(Method::GET, "/api-keys", None).await?;
        Ok(res.data.api_keys)
    }

    /// Creates a key. The response is the only place the plaintext ever
    /// appears; subsequent listings expose metadata alone.
    pub async fn create_api_key(
        &self,
        name: &str,
        permissions: &[String],
    ) -> Res<CreateKeyResponse> {
        self.request(
            Method::POST,
            "/api-keys",
            Some(json!({ "name": name, "permissions": permissions })),
        )
        .await
    }

    pub async fn get_api_key(&self, key_id: &str) -> Res<ApiKey> {
        let res: DataEnvelope<ApiKey> = self
            .request(Method::GET, &format!("/api-keys/{key_id}"), None)
            .await?;
        Ok(res.data)
    }

    pub async fn delete_api_key(&self, key_id: &str) -> Res<ActionReply> {
        self.request(Method::DELETE, &format!("/api-keys/{key_id}"), None)
            .await
    }

    /// Sets a key's active flag. Toggling twice lands the key back on its
    /// original state; the upstream owns the actual transition.
    pub async fn toggle_api_key(&self, key_id: &str, is_active: bool) -> Res<ApiKey> {
        let res: DataEnvelope<ApiKey> = self
            .request(
                Method::PATCH,
                &format!("/api-keys/{key_id}"),
                Some(json!({ "isActive": is_active })),
            )
            .await?;
        Ok(res.data)
    }

    // === Metrics ===

    pub async fn global_metrics(&self, hours_back: u32) -> Res<MetricsData> {
        let res: DataEnvelope<MetricsData> = self
            .request(Method::GET, &format!("/metrics?hoursBack={hours_back}"), None)
            .await?;
        Ok(res.data)
    }

    pub async fn api_key_metrics(
        &self,
        key_id: &str,
        page: u32,
        limit: u32,
        hours_back: u32,
    ) -> Res<ApiKeyMetrics> {
        let res: DataEnvelope<ApiKeyMetrics> = self
            .request(
                Method::GET,
                &format!(
                    "/api-keys/{key_id}/metrics?page={page}&limit={limit}&hoursBack={hours_back}"
                ),
                None,
            )
            .await?;
        Ok(res.data)
    }

    // === Ban management ===

    pub async fn all_bans(&self) -> Res<Vec<BanEntry>> {
        let res: DataEnvelope<BanList> = self.request(Method::GET, "/bans", None).await?;
        Ok(res.data.bans)
    }

    pub async fn user_bans(&self) -> Res<Vec<BanEntry>> {
        let res: DataEnvelope<BanList> = self.request(Method::GET, "/bans/users", None).await?;
        Ok(res.data.bans)
    }

    /// Server bans are not exposed as their own upstream listing; filter
    /// them out of the combined one.
    pub async fn server_bans(&self) -> Res<Vec<BanEntry>> {
        let bans = self.all_bans().await?;
        Ok(bans
            .into_iter()
            .filter(|ban| ban.target_type == BanTarget::Server)
            .collect())
    }

    pub async fn ban_user(
        &self,
        user_id: &str,
        reason: Option<&str>,
        duration: Option<&str>,
    ) -> Res<ActionReply> {
        let mut body = json!({ "userId": user_id });
        if let Some(reason) = reason {
            body["reason"] = json!(reason);
        }
        if let Some(duration) = duration {
            body["duration"] = json!(duration);
        }
        self.request(Method::POST, "/ban/user", Some(body)).await
    }

    pub async fn ban_server(
        &self,
        server_id: &str,
        name: Option<&str>,
        reason: Option<&str>,
        duration: Option<&str>,
    ) -> Res<ActionReply> {
        let mut body = json!({ "serverId": server_id });
        if let Some(name) = name {
            body["serverName"] = json!(name);
        }
        if let Some(reason) = reason {
            body["reason"] = json!(reason);
        }
        if let Some(duration) = duration {
            body["duration"] = json!(duration);
        }
        self.request(Method::POST, "/ban/server", Some(body)).await
    }

    pub async fn unban_user(&self, user_id: &str) -> Res<ActionReply> {
        self.request(Method::POST, "/unban/user", Some(json!({ "userId": user_id })))
            .await
    }

    pub async fn unban_server(&self, server_id: &str) -> Res<ActionReply> {
        self.request(
            Method::POST,
            "/unban/server",
            Some(json!({ "serverId": server_id })),
        )
        .await
    }

    // === Message management ===

    pub async fn message_info(&self, message_id: &str) -> Res<MessageInfo> {
        let res: DataEnvelope<MessageInfo> = self
            .request(Method::GET, &format!("/messages/{message_id}"), None)
            .await?;
        Ok(res.data)
    }

    /// Deletes a message everywhere. A 202 from the gateway means the
    /// outcome is uncertain and the operator should re-query the message;
    /// it is surfaced as `DeleteOutcome::Uncertain`, not as an error.
    pub async fn delete_message(&self, message_id: &str) -> Res<DeleteOutcome> {
        let response = self
            .send(Method::DELETE, &format!("/messages/{message_id}"), None)
            .await?;

        if response.status() == StatusCode::ACCEPTED {
            let warning = response.json().await?;
            info!("Message {} deletion outcome uncertain", message_id);
            return Ok(DeleteOutcome::Uncertain(warning));
        }
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(DeleteOutcome::Completed(response.json().await?))
    }
}
