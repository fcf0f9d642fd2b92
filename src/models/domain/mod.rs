pub mod analysis;
pub mod submission;
pub use analysis::{AnalysisKind, AnalysisOutcome, AnalysisResult, MetadataOutcome};
pub use submission::{PromptFields, StoredSubmission, Submission, SubmissionRecord, Tone};
