use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult, StoreError},
    models::domain::{StoredSubmission, Submission},
    repositories::SubmissionRepository,
};

/// Record store resolved once from configuration.
#[derive(Clone)]
pub enum StoreBackend {
    Available(Arc<dyn SubmissionRepository>),
    Unavailable,
}

pub struct SubmissionService {
    backend: StoreBackend,
}

impl SubmissionService {
    pub fn new(backend: StoreBackend) -> Self {
        Self { backend }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, StoreBackend::Available(_))
    }

    /// Persists a synthesized submission and returns its store-assigned id.
    pub async fn save(&self, submission: &Submission) -> Result<String, StoreError> {
        let StoreBackend::Available(repository) = &self.backend else {
            log::warn!("Record store is not configured. Data not saved.");
            return Err(StoreError::NotConfigured);
        };

        match repository.create(submission.to_record()).await {
            Ok(record_id) => {
                log::info!("Prompt saved to record store as {}", record_id);
                Ok(record_id)
            }
            Err(e) => {
                log::error!("Failed to save data to record store: {}", e);
                Err(e)
            }
        }
    }

    /// Reads every record, keeping the unconfigured and failed cases distinct.
    pub async fn try_fetch_all(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        let StoreBackend::Available(repository) = &self.backend else {
            return Err(StoreError::NotConfigured);
        };
        repository.list_all().await
    }

    /// Reads every record. Unconfigured stores and failed reads both yield an
    /// empty list; the difference only shows up in the logs.
    pub async fn fetch_all(&self) -> Vec<StoredSubmission> {
        match self.try_fetch_all().await {
            Ok(submissions) => {
                log::info!("Fetched {} submissions from record store", submissions.len());
                submissions
            }
            Err(StoreError::NotConfigured) => {
                log::warn!("Record store is not configured. Cannot fetch data.");
                Vec::new()
            }
            Err(e) => {
                log::error!("Failed to fetch data from record store: {}", e);
                Vec::new()
            }
        }
    }

    /// Looks a record up by its full id. Store failures surface as errors;
    /// `NotFound` means the store answered without that id.
    pub async fn find(&self, record_id: &str) -> AppResult<StoredSubmission> {
        self.try_fetch_all()
            .await
            .map_err(|e| {
                log::error!("Failed to look up record {}: {}", record_id, e);
                AppError::from(e)
            })?
            .into_iter()
            .find(|stored| stored.record_id == record_id)
            .ok_or_else(|| AppError::NotFound(format!("Record '{}' not found", record_id)))
    }
}
