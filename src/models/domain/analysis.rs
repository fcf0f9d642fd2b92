use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Quality,
    Metadata,
    StrengthsWeaknesses,
    BatchTrends,
}

impl AnalysisKind {
    /// The passes that run against one stored prompt.
    pub const SINGLE_PROMPT: [AnalysisKind; 3] = [
        AnalysisKind::Quality,
        AnalysisKind::Metadata,
        AnalysisKind::StrengthsWeaknesses,
    ];

    pub fn fallback_message(&self) -> &'static str {
        match self {
            AnalysisKind::Quality => "Could not generate analysis.",
            AnalysisKind::Metadata => "Could not extract metadata.",
            AnalysisKind::StrengthsWeaknesses => "Could not generate summary.",
            AnalysisKind::BatchTrends => "Could not generate batch analysis.",
        }
    }
}

/// Metadata extraction result: parsed JSON object, or the raw text when the
/// model did not return one.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "format", content = "value", rename_all = "snake_case")]
pub enum MetadataOutcome {
    Structured(Map<String, Value>),
    Raw(String),
}

impl MetadataOutcome {
    pub fn parse(response: &str) -> Self {
        let candidate = strip_code_fence(response);
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => MetadataOutcome::Structured(map),
            Ok(other) => {
                log::debug!("Metadata response is JSON but not an object: {}", other);
                MetadataOutcome::Raw(response.to_string())
            }
            Err(e) => {
                log::debug!("Metadata response is not valid JSON: {}", e);
                MetadataOutcome::Raw(response.to_string())
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as `json` on the opening fence line.
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim_start().starts_with('{') => inner.trim(),
        _ => body.trim(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum AnalysisResult {
    QualityCritique(String),
    Metadata(MetadataOutcome),
    StrengthsWeaknesses(String),
    BatchTrends(String),
}

impl AnalysisResult {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisResult::QualityCritique(_) => AnalysisKind::Quality,
            AnalysisResult::Metadata(_) => AnalysisKind::Metadata,
            AnalysisResult::StrengthsWeaknesses(_) => AnalysisKind::StrengthsWeaknesses,
            AnalysisResult::BatchTrends(_) => AnalysisKind::BatchTrends,
        }
    }
}

/// Outcome of one analysis pass, attributed to its kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Completed {
        result: AnalysisResult,
    },
    Failed {
        kind: AnalysisKind,
        message: String,
        detail: String,
    },
}

impl AnalysisOutcome {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisOutcome::Completed { result } => result.kind(),
            AnalysisOutcome::Failed { kind, .. } => *kind,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed { .. })
    }
}
