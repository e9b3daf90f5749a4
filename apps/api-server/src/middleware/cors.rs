//! CORS for the routes that target-site pages call from the browser.

use actix_cors::Cors;
use actix_web::http::{Method, header};

use crate::observability::REQUEST_ID_HEADER;

/// Read-only CORS policy. `None` accepts any origin.
pub fn public_cors(allowed_origins: Option<&[String]>) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET])
        .allowed_headers([header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers([REQUEST_ID_HEADER, "retry-after"])
        .max_age(3600);

    match allowed_origins {
        None => cors.allow_any_origin(),
        Some(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    use super::*;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn configured_origins_are_echoed_and_others_refused() {
        let origins = vec!["https://blog.example.com".to_string()];
        let app = test::init_service(
            App::new().service(
                web::scope("/public")
                    .wrap(public_cors(Some(&origins)))
                    .route("", web::get().to(ok)),
            ),
        )
        .await;

        let allowed = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/public")
                .insert_header((header::ORIGIN, "https://blog.example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(allowed.status(), StatusCode::OK);
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://blog.example.com"
        );

        let other = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/public")
                .insert_header((header::ORIGIN, "https://evil.example.net"))
                .to_request(),
        )
        .await;
        assert!(!other.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
