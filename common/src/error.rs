use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === APPLICATION ERRORS ===
    #[error("Missing Authorization header")]
    Unauthenticated,

    #[error("{0}")]
    Upstream(String),

    #[error("Upstream request timed out. The operation may still be processing upstream.")]
    Timeout,

    #[error("Connection closed by server before a response arrived. The operation may have completed.")]
    ConnectionClosed,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// True for the transport failures where the upstream may have finished
    /// the work even though no response made it back.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, AppError::Timeout | AppError::ConnectionClosed)
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "error": err_msg })
            } else {
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        match self {
            AppError::Unauthenticated => {
                HttpResponse::Unauthorized().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Upstream(message) => {
                log::error!("Upstream error: {}", message);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Timeout | AppError::ConnectionClosed => {
                log::warn!("Ambiguous upstream failure: {}", self);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(error))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

/// Classifies transport failures into the error taxonomy. Timeouts and
/// severed connections keep their own variants because the message-deletion
/// path reports them as an uncertain outcome rather than a hard failure.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else if err.is_connect() {
            AppError::Upstream(format!("Failed to reach upstream API: {}", err))
        } else if err.is_request() || err.is_body() {
            AppError::ConnectionClosed
        } else {
            AppError::Internal(err.to_string())
        }
    }
}
