use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Per-session admin state. Starts unauthenticated; only `AdminGate::login`
/// or a validated session token can mark it authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    session_id: String,
    authenticated: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            authenticated: false,
        }
    }

    pub(crate) fn resume(session_id: String) -> Self {
        Self {
            session_id,
            authenticated: true,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl Default for AdminSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared-secret check for the admin panel.
///
/// Plain string equality with no lockout or rate limiting; not a hardened
/// trust boundary.
pub struct AdminGate {
    secret: Option<SecretString>,
}

impl AdminGate {
    pub fn new(secret: Option<SecretString>) -> Self {
        Self { secret }
    }

    pub fn login(&self, session: &mut AdminSession, attempt: &str) -> AppResult<()> {
        let Some(secret) = &self.secret else {
            log::warn!("Admin login attempted but ADMIN_PASSWORD is not configured");
            return Err(AppError::NotConfigured(
                "Admin password is not configured".to_string(),
            ));
        };

        if attempt != secret.expose_secret() {
            log::warn!("Incorrect admin password for session {}", session.session_id);
            return Err(AppError::Unauthorized("Incorrect password.".to_string()));
        }

        session.authenticated = true;
        log::info!("Admin session {} authenticated", session.session_id);
        Ok(())
    }
}

pub fn require_admin(session: &AdminSession) -> AppResult<()> {
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized(
            "Admin login required".to_string(),
        ));
    }
    Ok(())
}
