use std::sync::Arc;

use crate::{
    constants::prompts::PROMPT_SYNTHESIS_INSTRUCTION,
    errors::{AppResult, GenerationError},
    models::{
        domain::{PromptFields, Submission},
        dto::{request::GeneratePromptRequest, response::GeneratePromptResponse},
    },
    services::{model_service::ModelService, submission_service::SubmissionService},
};

/// Labeled user payload for synthesis. Always contains all five headings, in
/// the same order, so identical fields produce identical bytes.
pub fn build_user_payload(fields: &PromptFields) -> String {
    format!(
        "**Goal:**\n{}\n\n**Context:**\n{}\n\n**Desired Format:**\n{}\n\n**Tone of Voice:**\n{}\n\n**Constraints:**\n{}\n",
        fields.goal, fields.context, fields.format, fields.tone, fields.constraints
    )
}

pub struct PromptService {
    model: Arc<ModelService>,
    submissions: Arc<SubmissionService>,
}

impl PromptService {
    pub fn new(model: Arc<ModelService>, submissions: Arc<SubmissionService>) -> Self {
        Self { model, submissions }
    }

    pub async fn synthesize(&self, fields: PromptFields) -> Result<Submission, GenerationError> {
        let payload = build_user_payload(&fields);
        let generated_prompt = self
            .model
            .complete(PROMPT_SYNTHESIS_INSTRUCTION, &payload)
            .await?;

        Ok(Submission::new(fields, generated_prompt))
    }

    /// Validates the form, synthesizes a prompt and persists it.
    ///
    /// A failed save is reported as a warning next to the generated prompt;
    /// it never discards the prompt.
    pub async fn generate_and_save(
        &self,
        request: GeneratePromptRequest,
    ) -> AppResult<GeneratePromptResponse> {
        let fields = PromptFields::try_from(request)?;
        let submission = self.synthesize(fields).await?;

        let (record_id, warning) = match self.submissions.save(&submission).await {
            Ok(record_id) => (Some(record_id), None),
            Err(e) => (None, Some(format!("Prompt generated but not saved: {}", e))),
        };

        Ok(GeneratePromptResponse {
            persisted: record_id.is_some(),
            record_id,
            warning,
            timestamp: submission.timestamp_string(),
            generated_prompt: submission.generated_prompt,
        })
    }
}
