use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Tone {
    Professional,
    Casual,
    Enthusiastic,
    Formal,
    Humorous,
    Neutral,
    Empathetic,
}

impl Tone {
    pub const ALL: [Tone; 7] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Enthusiastic,
        Tone::Formal,
        Tone::Humorous,
        Tone::Neutral,
        Tone::Empathetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Formal => "Formal",
            Tone::Humorous => "Humorous",
            Tone::Neutral => "Neutral",
            Tone::Empathetic => "Empathetic",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown tone '{}'", s))
    }
}

/// The five answers collected from the user, already validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptFields {
    pub goal: String,
    pub context: String,
    pub format: String,
    pub tone: Tone,
    pub constraints: String,
}

/// A successfully synthesized prompt together with the fields it came from.
///
/// Only produced by the synthesizer, so a `Submission` always carries a
/// non-empty generated prompt and the time synthesis completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub fields: PromptFields,
    pub generated_prompt: String,
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    pub fn new(fields: PromptFields, generated_prompt: String) -> Self {
        Submission {
            fields,
            generated_prompt,
            // Stored at the precision it is serialized with.
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn to_record(&self) -> SubmissionRecord {
        SubmissionRecord {
            goal: self.fields.goal.clone(),
            context: self.fields.context.clone(),
            format: self.fields.format.clone(),
            tone: self.fields.tone.to_string(),
            constraints: self.fields.constraints.clone(),
            generated_prompt: Some(self.generated_prompt.clone()),
            timestamp: Some(self.timestamp_string()),
        }
    }
}

/// Field layout of a persisted submission, as it travels to and from the store.
///
/// Records are read back as written by any client, so every field tolerates
/// being absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionRecord {
    #[serde(rename = "Goal", default)]
    pub goal: String,
    #[serde(rename = "Context", default)]
    pub context: String,
    #[serde(rename = "Format", default)]
    pub format: String,
    #[serde(rename = "Tone", default)]
    pub tone: String,
    #[serde(rename = "Constraints", default)]
    pub constraints: String,
    #[serde(
        rename = "GeneratedPrompt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_prompt: Option<String>,
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A record read back from the store, keyed by its store-assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSubmission {
    pub record_id: String,
    pub record: SubmissionRecord,
}

impl StoredSubmission {
    pub fn new(record_id: impl Into<String>, record: SubmissionRecord) -> Self {
        StoredSubmission {
            record_id: record_id.into(),
            record,
        }
    }

    /// Display label built from the last five characters of the record id.
    pub fn label(&self) -> String {
        let id = self.record_id.as_str();
        let tail = id
            .char_indices()
            .rev()
            .nth(4)
            .map(|(idx, _)| &id[idx..])
            .unwrap_or(id);
        format!("Record ...{}", tail)
    }

    /// The generated prompt, if present and not blank.
    pub fn usable_prompt(&self) -> Option<&str> {
        self.record
            .generated_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }
}

#[cfg(test)]
impl PromptFields {
    pub fn test_fields() -> Self {
        PromptFields {
            goal: "Write a haiku".to_string(),
            context: "about autumn".to_string(),
            format: "3 lines".to_string(),
            tone: Tone::Casual,
            constraints: String::new(),
        }
    }
}
