use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::{
        claims::{AdminClaims, ADMIN_SUBJECT},
        session::AdminSession,
    },
    errors::{AppError, AppResult},
};

/// Issues and checks the bearer tokens that carry an authenticated admin
/// session between requests.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
        }
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    pub fn create_token(&self, session: &AdminSession) -> AppResult<String> {
        if !session.is_authenticated() {
            return Err(AppError::Unauthorized(
                "Cannot issue a token for an unauthenticated session".to_string(),
            ));
        }

        let claims = AdminClaims::new(session.session_id(), self.expiration_hours)?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<AdminSession> {
        let claims = decode::<AdminClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Admin session has expired".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })?;

        if claims.sub != ADMIN_SUBJECT {
            return Err(AppError::Unauthorized(
                "Token is not an admin session token".to_string(),
            ));
        }

        Ok(AdminSession::resume(claims.sid))
    }
}
