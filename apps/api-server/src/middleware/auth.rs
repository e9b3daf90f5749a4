//! API key authentication for internal routes.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Proof that the request carried the configured API key.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn internal_route(_key: ApiKey) -> impl Responder {
///     "trusted caller"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequest for ApiKey {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        ready(check(state.api_key.as_deref(), req))
    }
}

fn check(expected: Option<&str>, req: &HttpRequest) -> Result<ApiKey, AppError> {
    let Some(expected) = expected else {
        tracing::warn!("Rejected internal request: no API key configured");
        return Err(AppError::Unauthorized(
            "API key authentication is not configured".to_string(),
        ));
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(ApiKey),
        Some(_) => {
            tracing::debug!("invalid api key");
            Err(AppError::Unauthorized("Invalid API key".to_string()))
        }
        None => {
            tracing::debug!("missing api key header");
            Err(AppError::Unauthorized(format!(
                "Please provide the API key in the {API_KEY_HEADER} header."
            )))
        }
    }
}
