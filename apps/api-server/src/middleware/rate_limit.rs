//! Rate limiting middleware for the anonymous routes.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use blogpost_core::ports::RateLimiter;
use futures::future::LocalBoxFuture;

use crate::middleware::error::AppError;

/// Rate limiting middleware factory.
///
/// Without a limiter every request passes through.
pub struct RateLimitMiddleware {
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Option<Arc<dyn RateLimiter>>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(limiter) = &self.limiter {
            // Client identifier: the peer address, or the forwarded one behind a proxy
            let key = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string();

            match limiter.check(&key) {
                Ok(result) if !result.allowed => {
                    tracing::warn!(client = %key, "Rate limit exceeded");

                    // Round up so clients never retry too early
                    let retry_after_secs = result.reset_after.as_secs()
                        + u64::from(result.reset_after.subsec_nanos() > 0);
                    let response = AppError::TooManyRequests { retry_after_secs }.error_response();

                    let (http_req, _payload) = req.into_parts();
                    let srv_response = ServiceResponse::new(http_req, response);
                    return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Rate limiter error, failing open: {}", e),
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use blogpost_core::ports::{RateLimitError, RateLimitResult};

    use super::*;

    struct Fixed(Result<bool, ()>);

    impl RateLimiter for Fixed {
        fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            match self.0 {
                Ok(allowed) => Ok(RateLimitResult {
                    allowed,
                    reset_after: Duration::from_millis(1500),
                }),
                Err(()) => Err(RateLimitError::Backend("down".into())),
            }
        }
    }

    async fn status_with(limiter: Fixed) -> (StatusCode, Option<String>) {
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(Some(Arc::new(limiter))))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let retry_after = res
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        (res.status(), retry_after)
    }

    #[actix_web::test]
    async fn rejected_requests_get_429_with_retry_after() {
        let (status, retry_after) = status_with(Fixed(Ok(false))).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(retry_after.as_deref(), Some("2"));
    }

    #[actix_web::test]
    async fn limiter_errors_fail_open() {
        let (status, _) = status_with(Fixed(Err(()))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
