use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

fn backend_status(available: bool) -> &'static str {
    if available {
        "configured"
    } else {
        "disabled"
    }
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "generation": backend_status(state.model_service.is_available()),
            "record_store": backend_status(state.submission_service.is_available()),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        services::{model_service::GenerationBackend, submission_service::StoreBackend},
    };
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_ready_reports_disabled_backends() {
        let state = AppState::from_parts(
            Config::test_config(),
            GenerationBackend::Unavailable,
            StoreBackend::Unavailable,
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["dependencies"]["generation"], "disabled");
        assert_eq!(body["dependencies"]["record_store"], "disabled");
    }
}
