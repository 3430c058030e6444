use actix_web::{
    HttpResponse, delete, get,
    web::{self},
};
use common::error::Res;
use log::warn;
use serde_json::json;
use upstream::UpstreamClient;

use crate::middleware::auth::AuthHeader;

/// Looks up a mirrored message. Any per-server message id resolves to the
/// canonical record; that resolution happens entirely upstream.
#[get("/messages/{message_id}")]
pub async fn get_message_info(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    path: web::Path<String>,
) -> Res<HttpResponse> {
    let message_id = path.into_inner();
    let data = upstream
        .get(&format!("/message/info/{message_id}"), Some(auth.value()))
        .await?;
    Ok(HttpResponse::Ok().json(data))
}

/// Deletes a message from every server it was mirrored to.
///
/// Deletion is destructive and its completion can be ambiguous: when the
/// upstream call times out or the connection drops, the deletion may still
/// have gone through. Those failures are reported as a 202 warning telling
/// the operator to re-query the message, not as a hard error.
#[delete("/messages/{message_id}")]
pub async fn delete_message(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    path: web::Path<String>,
) -> Res<HttpResponse> {
    let message_id = path.into_inner();
    match upstream
        .delete(&format!("/message/{message_id}"), Some(auth.value()))
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(data)),
        Err(err) if err.is_ambiguous() => {
            warn!("Ambiguous outcome deleting message {}: {}", message_id, err);
            Ok(HttpResponse::Accepted().json(json!({
                "status": "warning",
                "message": "Delete operation sent but connection closed. Message may have been deleted successfully.",
                "error": err.to_string(),
                "suggestion": "Please search for the message again to verify deletion status.",
            })))
        }
        Err(err) => Err(err),
    }
}
