use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub sid: String, // Admin session id
    pub exp: usize,
    pub iat: usize,
}

impl AdminClaims {
    /// Claims valid from now for `expiration_hours`. Non-positive or
    /// overflowing lifetimes are rejected.
    pub fn new(session_id: &str, expiration_hours: i64) -> AppResult<Self> {
        let invalid = || {
            AppError::InternalError(format!(
                "Invalid admin session lifetime: {} hours",
                expiration_hours
            ))
        };

        if expiration_hours <= 0 {
            return Err(invalid());
        }

        let now = Utc::now();
        let exp = TimeDelta::try_hours(expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(invalid)?;

        Ok(Self {
            sub: ADMIN_SUBJECT.to_string(),
            sid: session_id.to_string(),
            iat: usize::try_from(now.timestamp()).map_err(|_| invalid())?,
            exp: usize::try_from(exp.timestamp()).map_err(|_| invalid())?,
        })
    }
}
