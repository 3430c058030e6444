use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use common::error::AppError;
use futures::future::{Ready, ok};
use std::{future::Future, pin::Pin, sync::Arc};

/// The inbound `Authorization` header value, made available to route
/// handlers via `web::ReqData` once the middleware has admitted a request.
/// The value is forwarded to the upstream admin API verbatim; this layer
/// never inspects or validates the credential itself.
#[derive(Clone, Debug)]
pub struct AuthHeader(String);

impl AuthHeader {
    pub fn value(&self) -> &str {
        &self.0
    }
}

// AuthMiddleware struct (as a Transform)
pub struct AuthMiddleware {}

impl AuthMiddleware {
    pub fn new() -> Self {
        AuthMiddleware {}
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // retrieve the Authorization header before any upstream work
        let auth_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_owned);

        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            match auth_value {
                None => Ok(req.error_response(AppError::Unauthenticated)),
                Some(value) => {
                    req.extensions_mut().insert(AuthHeader(value));
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
            }
        })
    }
}
