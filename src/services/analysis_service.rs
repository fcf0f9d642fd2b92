use std::sync::Arc;

use futures::future::join_all;

use crate::{
    config::Instructions,
    errors::{AppError, AppResult},
    models::{
        domain::{AnalysisKind, AnalysisOutcome, AnalysisResult, MetadataOutcome, StoredSubmission},
        dto::response::{BatchAnalysisResponse, PromptAnalysisResponse},
    },
    services::model_service::ModelService,
};

/// Placed between prompts when they are sent together for trend analysis.
pub const BATCH_SEPARATOR: &str = "\n\n---\n\n";

pub struct AnalysisService {
    model: Arc<ModelService>,
    instructions: Instructions,
}

impl AnalysisService {
    pub fn new(model: Arc<ModelService>, instructions: Instructions) -> Self {
        Self {
            model,
            instructions,
        }
    }

    fn instruction_for(&self, kind: AnalysisKind) -> &str {
        match kind {
            AnalysisKind::Quality => &self.instructions.quality,
            AnalysisKind::Metadata => &self.instructions.metadata,
            AnalysisKind::StrengthsWeaknesses => &self.instructions.strengths_weaknesses,
            AnalysisKind::BatchTrends => &self.instructions.batch_trends,
        }
    }

    /// Runs one analysis pass. Failures become a `Failed` outcome.
    pub async fn run(&self, kind: AnalysisKind, payload: &str) -> AnalysisOutcome {
        log::info!("Running {:?} analysis over {} bytes", kind, payload.len());

        match self.model.complete(self.instruction_for(kind), payload).await {
            Ok(text) => {
                let result = match kind {
                    AnalysisKind::Quality => AnalysisResult::QualityCritique(text),
                    AnalysisKind::Metadata => AnalysisResult::Metadata(MetadataOutcome::parse(&text)),
                    AnalysisKind::StrengthsWeaknesses => AnalysisResult::StrengthsWeaknesses(text),
                    AnalysisKind::BatchTrends => AnalysisResult::BatchTrends(text),
                };
                AnalysisOutcome::Completed { result }
            }
            Err(e) => {
                log::warn!("{:?} analysis failed: {}", kind, e);
                AnalysisOutcome::Failed {
                    kind,
                    message: kind.fallback_message().to_string(),
                    detail: e.to_string(),
                }
            }
        }
    }

    /// Runs the requested passes concurrently. Outcomes come back in request
    /// order and one failing pass leaves the others untouched.
    pub async fn analyze_prompt(&self, prompt: &str, kinds: &[AnalysisKind]) -> Vec<AnalysisOutcome> {
        join_all(kinds.iter().map(|kind| self.run(*kind, prompt))).await
    }

    pub async fn analyze_record(
        &self,
        stored: &StoredSubmission,
        kinds: &[AnalysisKind],
    ) -> AppResult<PromptAnalysisResponse> {
        let prompt = stored.usable_prompt().ok_or_else(|| {
            AppError::ValidationError(format!(
                "{} has no generated prompt to analyze",
                stored.label()
            ))
        })?;

        let analyses = self.analyze_prompt(prompt, kinds).await;

        Ok(PromptAnalysisResponse {
            record_id: stored.record_id.clone(),
            label: stored.label(),
            prompt: prompt.to_string(),
            analyses,
        })
    }

    /// Trend report over every usable stored prompt. With nothing stored the
    /// call still goes through, with an empty payload.
    pub async fn batch_trends(&self, submissions: &[StoredSubmission]) -> BatchAnalysisResponse {
        let (payload, prompt_count) = join_prompts(submissions);
        let analysis = self.run(AnalysisKind::BatchTrends, &payload).await;

        BatchAnalysisResponse {
            prompt_count,
            analysis,
        }
    }
}

/// Joins the usable generated prompts, skipping missing and blank ones.
pub fn join_prompts(submissions: &[StoredSubmission]) -> (String, usize) {
    let prompts: Vec<&str> = submissions
        .iter()
        .filter_map(StoredSubmission::usable_prompt)
        .collect();
    (prompts.join(BATCH_SEPARATOR), prompts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::GenerationError,
        models::domain::SubmissionRecord,
        services::model_service::{GenerationBackend, MockTextGenerator},
    };

    fn service_with(mock: MockTextGenerator) -> AnalysisService {
        AnalysisService::new(
            Arc::new(ModelService::new(GenerationBackend::Available(Arc::new(mock)))),
            Instructions::default(),
        )
    }

    fn stored(id: &str, prompt: Option<&str>) -> StoredSubmission {
        StoredSubmission::new(
            id,
            SubmissionRecord {
                generated_prompt: prompt.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_metadata_raw_fallback() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok("not valid json".into()));

        let outcome = service_with(mock)
            .run(AnalysisKind::Metadata, "some prompt")
            .await;

        assert_eq!(
            outcome,
            AnalysisOutcome::Completed {
                result: AnalysisResult::Metadata(MetadataOutcome::Raw("not valid json".into()))
            }
        );
    }

    #[tokio::test]
    async fn test_each_kind_uses_its_own_instruction() {
        let instructions = Instructions::default();
        let expected = instructions.strengths_weaknesses.clone();

        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(move |r| r.system_instruction == expected && r.user_payload == "p")
            .times(1)
            .returning(|_| Ok("**Strengths**".into()));

        let outcome = service_with(mock)
            .run(AnalysisKind::StrengthsWeaknesses, "p")
            .await;
        assert_eq!(outcome.kind(), AnalysisKind::StrengthsWeaknesses);
        assert!(outcome.is_completed());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let metadata_instruction = Instructions::default().metadata;

        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(3).returning(move |r| {
            if r.system_instruction == metadata_instruction {
                Err(GenerationError::ProviderError("timeout".into()))
            } else {
                Ok(format!("analysis of {}", r.user_payload))
            }
        });

        let outcomes = service_with(mock)
            .analyze_prompt("the prompt", &AnalysisKind::SINGLE_PROMPT)
            .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].kind(), AnalysisKind::Quality);
        assert!(outcomes[0].is_completed());
        assert_eq!(outcomes[1].kind(), AnalysisKind::Metadata);
        assert!(!outcomes[1].is_completed());
        assert_eq!(outcomes[2].kind(), AnalysisKind::StrengthsWeaknesses);
        assert!(outcomes[2].is_completed());
    }

    #[tokio::test]
    async fn test_unconfigured_generator_fails_each_pass() {
        let service = AnalysisService::new(
            Arc::new(ModelService::new(GenerationBackend::Unavailable)),
            Instructions::default(),
        );

        let outcomes = service
            .analyze_prompt("p", &AnalysisKind::SINGLE_PROMPT)
            .await;
        assert!(outcomes.iter().all(|o| !o.is_completed()));
    }

    #[test]
    fn test_join_prompts_skips_missing_and_blank() {
        let submissions = vec![
            stored("r1", Some("first")),
            stored("r2", None),
            stored("r3", Some("  ")),
            stored("r4", Some("second")),
        ];

        let (payload, count) = join_prompts(&submissions);
        assert_eq!(payload, "first\n\n---\n\nsecond");
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_batch_over_zero_prompts_calls_through() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|r| r.user_payload.is_empty())
            .times(1)
            .returning(|_| Ok("There is nothing to analyze.".into()));

        let response = service_with(mock).batch_trends(&[]).await;

        assert_eq!(response.prompt_count, 0);
        assert_eq!(
            response.analysis,
            AnalysisOutcome::Completed {
                result: AnalysisResult::BatchTrends("There is nothing to analyze.".into())
            }
        );
    }

    #[tokio::test]
    async fn test_analyze_record_without_prompt_is_rejected() {
        let service = service_with(MockTextGenerator::new());

        let result = service
            .analyze_record(&stored("recEMPTY", None), &AnalysisKind::SINGLE_PROMPT)
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
