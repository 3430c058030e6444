use actix_web::{
    Responder, get,
    web::{self},
};
use common::{error::Res, http::Success};
use upstream::UpstreamClient;

use crate::{dtos::query::MetricsQuery, middleware::auth::AuthHeader};

/// Global request metrics across all API keys, windowed by a look-back in
/// hours (default 24).
#[get("/metrics")]
pub async fn get_metrics(
    upstream: web::Data<UpstreamClient>,
    auth: web::ReqData<AuthHeader>,
    query: web::Query<MetricsQuery>,
) -> Res<impl Responder> {
    let hours_back = query.hours_back.unwrap_or(24);
    let data = upstream
        .get(
            &format!("/admin/metrics?hoursBack={hours_back}"),
            Some(auth.value()),
        )
        .await?;
    Success::ok(data)
}
