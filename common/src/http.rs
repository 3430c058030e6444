use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use super::error::Res;

/// Success responses for proxy handlers. The body is whatever the upstream
/// returned; only the status is decided here (201 for key creation, 200
/// otherwise).
pub struct Success;
impl Success {
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(body))
    }
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
}
