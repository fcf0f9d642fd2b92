use actix_web::{http::header, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::RequestId,
    models::dto::request::{GeneratePromptQuery, GeneratePromptRequest},
};

#[post("/api/prompts")]
async fn generate_prompt(
    state: web::Data<AppState>,
    query: web::Query<GeneratePromptQuery>,
    request: web::Json<GeneratePromptRequest>,
    request_id: Option<web::ReqData<RequestId>>,
) -> Result<HttpResponse, AppError> {
    let request_id = RequestId::label(request_id);
    let response = state
        .prompt_service
        .generate_and_save(request.into_inner())
        .await
        .map_err(|e| {
            log::warn!("Prompt generation failed [{}]: {}", request_id, e);
            e
        })?;

    if let Some(warning) = &response.warning {
        log::warn!("{} [{}]", warning, request_id);
    }

    if query.download {
        return Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"generated_prompt.txt\"",
            ))
            .body(response.generated_prompt));
    }

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::Config,
        middleware::{RequestIdMiddleware, REQUEST_ID_HEADER},
        services::{
            model_service::{GenerationBackend, MockTextGenerator},
            submission_service::StoreBackend,
        },
        test_utils::{fixtures::generate_request, test_helpers::assert_error_status},
    };
    use actix_web::{http::StatusCode, test, App};

    fn state_with(generation: GenerationBackend) -> web::Data<AppState> {
        web::Data::new(AppState::from_parts(
            Config::test_config(),
            generation,
            StoreBackend::Unavailable,
        ))
    }

    fn generator_returning(text: &'static str) -> GenerationBackend {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(move |_| Ok(text.to_string()));
        GenerationBackend::Available(Arc::new(mock))
    }

    #[actix_web::test]
    async fn test_missing_fields_are_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(GenerationBackend::Unavailable))
                .service(generate_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prompts")
            .set_json(serde_json::json!({ "goal": "Write a haiku", "tone": "Casual" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["missing_fields"], serde_json::json!(["context", "format"]));
    }

    #[actix_web::test]
    async fn test_unconfigured_generator_is_service_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(GenerationBackend::Unavailable))
                .service(generate_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prompts")
            .set_json(generate_request())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_generated_prompt_without_store_carries_warning() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(generator_returning("You are a poet.")))
                .service(generate_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prompts")
            .set_json(generate_request())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["generated_prompt"], "You are a poet.");
        assert_eq!(body["persisted"], false);
        assert!(body["warning"].is_string());
    }

    #[actix_web::test]
    async fn test_download_returns_text_attachment() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(generator_returning("You are a poet.")))
                .service(generate_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prompts?download=true")
            .set_json(generate_request())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("generated_prompt.txt"));

        let body = test::read_body(resp).await;
        assert_eq!(body, "You are a poet.");
    }

    #[actix_web::test]
    async fn test_failed_generation_keeps_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(state_with(GenerationBackend::Unavailable))
                .service(generate_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/prompts")
            .insert_header((REQUEST_ID_HEADER, "req-7"))
            .set_json(generate_request())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-7");
    }
}
