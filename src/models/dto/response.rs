use serde::Serialize;

use crate::models::domain::{AnalysisOutcome, StoredSubmission};

#[derive(Debug, Clone, Serialize)]
pub struct GeneratePromptResponse {
    pub generated_prompt: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// One row of the admin submissions table.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRowDto {
    pub record_id: String,
    pub label: String,
    pub timestamp: Option<String>,
    pub goal: String,
    pub context: String,
    pub format: String,
    pub tone: String,
    pub constraints: String,
    pub generated_prompt: Option<String>,
}

impl From<StoredSubmission> for SubmissionRowDto {
    fn from(stored: StoredSubmission) -> Self {
        let label = stored.label();
        let record = stored.record;
        SubmissionRowDto {
            record_id: stored.record_id,
            label,
            timestamp: record.timestamp,
            goal: record.goal,
            context: record.context,
            format: record.format,
            tone: record.tone,
            constraints: record.constraints,
            generated_prompt: record.generated_prompt,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListDto {
    pub submissions: Vec<SubmissionRowDto>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub expires_in_hours: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptAnalysisResponse {
    pub record_id: String,
    pub label: String,
    pub prompt: String,
    pub analyses: Vec<AnalysisOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchAnalysisResponse {
    pub prompt_count: usize,
    pub analysis: AnalysisOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::SubmissionRecord;

    #[test]
    fn test_submission_row_from_stored() {
        let stored = StoredSubmission::new(
            "recXYZ12345",
            SubmissionRecord {
                goal: "Summarize a paper".into(),
                generated_prompt: Some("You are a research assistant.".into()),
                timestamp: Some("2026-01-01T00:00:00.000Z".into()),
                ..Default::default()
            },
        );

        let row: SubmissionRowDto = stored.into();
        assert_eq!(row.record_id, "recXYZ12345");
        assert_eq!(row.label, "Record ...12345");
        assert_eq!(row.goal, "Summarize a paper");
        assert_eq!(row.generated_prompt.as_deref(), Some("You are a research assistant."));
    }

    #[test]
    fn test_generate_response_omits_absent_record_id() {
        let response = GeneratePromptResponse {
            generated_prompt: "p".into(),
            timestamp: "t".into(),
            record_id: None,
            persisted: false,
            warning: Some("Record store is not configured".into()),
        };
        let value = serde_json::to_value(&response).unwrap();

        assert!(value.get("record_id").is_none());
        assert_eq!(value["persisted"], false);
    }
}
