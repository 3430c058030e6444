use actix_web::{
    Responder, get, post,
    web::{self},
};
use common::{error::Res, http::Success};
use serde_json::Value;
use upstream::UpstreamClient;

use crate::middleware::auth::AuthHeader;

/// All ban entries, covering both user and server targets.
#[get("/bans")]
pub async fn get_bans(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
) -> Res<impl Responder> {
    let data = upstream.get("/bans", Some(auth.value())).await?;
    Success::ok(data)
}

#[get("/bans/users")]
pub async fn get_user_bans(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
) -> Res<impl Responder> {
    let data = upstream.get("/bans/users", Some(auth.value())).await?;
    Success::ok(data)
}

#[post("/ban/user")]
pub async fn post_ban_user(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    body: web::Json<Value>,
) -> Res<impl Responder> {
    let data = upstream.post("/ban/user", Some(auth.value()), &body).await?;
    Success::ok(data)
}

#[post("/ban/server")]
pub async fn post_ban_server(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    body: web::Json<Value>,
) -> Res<impl Responder> {
    let data = upstream
        .post("/ban/server", Some(auth.value()), &body)
        .await?;
    Success::ok(data)
}

#[post("/unban/user")]
pub async fn post_unban_user(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    body: web::Json<Value>,
) -> Res<impl Responder> {
    let data = upstream
        .post("/unban/user", Some(auth.value()), &body)
        .await?;
    Success::ok(data)
}

#[post("/unban/server")]
pub async fn post_unban_server(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    body: web::Json<Value>,
) -> Res<impl Responder> {
    let data = upstream
        .post("/unban/server", Some(auth.value()), &body)
        .await?;
    Success::ok(data)
}
