use actix_web::{
    Responder, delete, get, patch, post,
    web::{self},
};
use common::{error::Res, http::Success};
use serde_json::Value;
use upstream::UpstreamClient;

use crate::{dtos::query::KeyMetricsQuery, middleware::auth::AuthHeader};

/// Lists all API keys known to the upstream admin API. The response never
/// contains key plaintext, only metadata.
#[get("/api-keys")]
pub async fn get_keys(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
) -> Res<impl Responder> {
    let data = upstream.get("/admin/api-keys", Some(auth.value())).await?;
    Success::ok(data)
}

/// Creates a new API key. The upstream response carries the one-time
/// plaintext key; it is passed through untouched with a 201 status.
#[post("/api-keys")]
pub async fn post_create_key(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    body: web::Json<Value>,
) -> Res<impl Responder> {
    let data = upstream
        .post("/admin/api-keys", Some(auth.value()), &body)
        .await?;
    Success::created(data)
}

/// Paginated per-key request metrics, windowed by a look-back in hours.
#[get("/api-keys/{key_id}/metrics")]
pub async fn get_key_metrics(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    path: web::Path<String>,
    query: web::Query<KeyMetricsQuery>,
) -> Res<impl Responder> {
    let key_id = path.into_inner();
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    let hours_back = query.hours_back.unwrap_or(24);

    let data = upstream
        .get(
            &format!("/admin/api-keys/{key_id}/metrics?page={page}&limit={limit}&hoursBack={hours_back}"),
            Some(auth.value()),
        )
        .await?;
    Success::ok(data)
}

#[get("/api-keys/{key_id}")]
pub async fn get_key_detail(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    path: web::Path<String>,
) -> Res<impl Responder> {
    let key_id = path.into_inner();
    let data = upstream
        .get(&format!("/admin/api-keys/{key_id}"), Some(auth.value()))
        .await?;
    Success::ok(data)
}

#[delete("/api-keys/{key_id}")]
pub async fn delete_key(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    path: web::Path<String>,
) -> Res<impl Responder> {
    let key_id = path.into_inner();
    let data = upstream
        .delete(&format!("/admin/api-keys/{key_id}"), Some(auth.value()))
        .await?;
    Success::ok(data)
}

/// Updates an API key, typically to toggle its `isActive` flag. The body is
/// forwarded opaquely so the route stays aligned with whatever fields the
/// upstream accepts.
#[patch("/api-keys/{key_id}")]
pub async fn patch_key(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Res<impl Responder> {
    let key_id = path.into_inner();
    let data = upstream
        .patch(&format!("/admin/api-keys/{key_id}"), Some(auth.value()), &body)
        .await?;
    Success::ok(data)
}
