use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AdminSession},
    errors::AppError,
    middleware::RequestId,
    models::dto::{
        request::{AdminLoginRequest, AnalyzeRecordRequest},
        response::{AdminLoginResponse, SubmissionListDto, SubmissionRowDto},
    },
};

#[post("/api/admin/login")]
async fn admin_login(
    state: web::Data<AppState>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let mut session = AdminSession::new();
    state.admin_gate.login(&mut session, &request.password)?;

    let token = state.jwt_service.create_token(&session)?;

    Ok(HttpResponse::Ok().json(AdminLoginResponse {
        token,
        expires_in_hours: state.jwt_service.expiration_hours(),
        message: "Logged in successfully.".to_string(),
    }))
}

#[get("/api/admin/submissions")]
async fn list_submissions(
    state: web::Data<AppState>,
    session: AdminSession,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let submissions: Vec<SubmissionRowDto> = state
        .submission_service
        .fetch_all()
        .await
        .into_iter()
        .map(SubmissionRowDto::from)
        .collect();

    let message = submissions.is_empty().then(|| {
        "No records found in the record store or the store is not configured.".to_string()
    });

    Ok(HttpResponse::Ok().json(SubmissionListDto {
        total: submissions.len(),
        submissions,
        message,
    }))
}

#[post("/api/admin/submissions/{record_id}/analysis")]
async fn analyze_submission(
    state: web::Data<AppState>,
    record_id: web::Path<String>,
    request: Option<web::Json<AnalyzeRecordRequest>>,
    session: AdminSession,
    request_id: Option<web::ReqData<RequestId>>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let kinds = request
        .map(web::Json::into_inner)
        .unwrap_or_default()
        .kinds()?;
    let stored = state
        .submission_service
        .find(&record_id)
        .await
        .map_err(|e| {
            log::warn!(
                "Analysis of {} not started [{}]: {}",
                record_id,
                RequestId::label(request_id),
                e
            );
            e
        })?;

    let response = state.analysis_service.analyze_record(&stored, &kinds).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/admin/analysis/batch")]
async fn batch_analysis(
    state: web::Data<AppState>,
    session: AdminSession,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let submissions = state.submission_service.fetch_all().await;
    let response = state.analysis_service.batch_trends(&submissions).await;
    Ok(HttpResponse::Ok().json(response))
}
