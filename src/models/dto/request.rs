use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnalysisKind, PromptFields, Tone},
};

/// The prompt form as submitted by the user.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct GeneratePromptRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub goal: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub context: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub format: String,

    #[serde(default)]
    #[validate(custom(function = "known_tone"))]
    pub tone: String,

    #[serde(default)]
    pub constraints: String,
}

impl TryFrom<GeneratePromptRequest> for PromptFields {
    type Error = AppError;

    fn try_from(request: GeneratePromptRequest) -> AppResult<Self> {
        request.validate()?;

        let tone = request
            .tone
            .parse::<Tone>()
            .map_err(AppError::ValidationError)?;

        Ok(PromptFields {
            goal: request.goal,
            context: request.context,
            format: request.format,
            tone,
            constraints: request.constraints,
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn known_tone(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    value
        .parse::<Tone>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_tone"))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratePromptQuery {
    #[serde(default)]
    pub download: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRecordRequest {
    #[serde(default)]
    pub kinds: Option<Vec<AnalysisKind>>,
}

impl AnalyzeRecordRequest {
    /// Requested single-prompt passes, defaulting to all of them.
    pub fn kinds(&self) -> AppResult<Vec<AnalysisKind>> {
        let Some(kinds) = &self.kinds else {
            return Ok(AnalysisKind::SINGLE_PROMPT.to_vec());
        };

        if kinds.contains(&AnalysisKind::BatchTrends) {
            return Err(AppError::ValidationError(
                "batch_trends runs over all prompts; use the batch analysis endpoint".to_string(),
            ));
        }

        let mut requested: Vec<AnalysisKind> = Vec::new();
        for kind in kinds {
            if !requested.contains(kind) {
                requested.push(*kind);
            }
        }
        if requested.is_empty() {
            return Ok(AnalysisKind::SINGLE_PROMPT.to_vec());
        }
        Ok(requested)
    }
}
