use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::Header, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};

use crate::{app_state::AppState, auth::session::AdminSession, errors::AppError};

/// Resolves the admin session for a request from its bearer token.
///
/// A missing or invalid token yields an unauthenticated session rather than
/// an error; handlers decide with `require_admin`.
impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::InternalError(
                "Application state not configured".to_string(),
            )));
        };

        let session = match Authorization::<Bearer>::parse(req) {
            Ok(auth) => {
                let bearer = auth.into_scheme();
                state
                    .jwt_service
                    .validate_token(bearer.token())
                    .unwrap_or_else(|e| {
                        log::debug!("Rejected admin token: {}", e);
                        AdminSession::new()
                    })
            }
            Err(_) => AdminSession::new(),
        };

        ready(Ok(session))
    }
}
