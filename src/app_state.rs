use std::sync::Arc;

use crate::{
    auth::{AdminGate, JwtService},
    config::{Config, StoreCredentials},
    db::Database,
    errors::{AppError, AppResult},
    repositories::{AirtableSubmissionRepository, MongoSubmissionRepository},
    services::{
        analysis_service::AnalysisService,
        model_service::{GenerationBackend, ModelService},
        prompt_service::PromptService,
        submission_service::{StoreBackend, SubmissionService},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub model_service: Arc<ModelService>,
    pub submission_service: Arc<SubmissionService>,
    pub prompt_service: Arc<PromptService>,
    pub analysis_service: Arc<AnalysisService>,
    pub admin_gate: Arc<AdminGate>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Resolves both backends from configuration. A backend that is
    /// configured but cannot be constructed is fatal.
    pub async fn new(config: Config) -> AppResult<Self> {
        let generation = GenerationBackend::from_config(&config);
        let store = Self::resolve_store(&config).await?;
        Ok(Self::from_parts(config, generation, store))
    }

    async fn resolve_store(config: &Config) -> AppResult<StoreBackend> {
        match &config.store {
            Some(StoreCredentials::Airtable {
                api_key,
                api_url,
                base_id,
                table_name,
            }) => {
                let repository =
                    AirtableSubmissionRepository::new(api_url, api_key.clone(), base_id, table_name)
                        .map_err(|e| AppError::InternalError(e.to_string()))?;
                log::info!("Record store: Airtable table '{}' in base {}", table_name, base_id);
                Ok(StoreBackend::Available(Arc::new(repository)))
            }
            Some(StoreCredentials::Mongo {
                conn_string,
                db_name,
                collection,
            }) => {
                let db = Database::connect(conn_string, db_name).await?;
                log::info!(
                    "Record store: MongoDB collection '{}' in database '{}'",
                    collection,
                    db.db_name()
                );
                Ok(StoreBackend::Available(Arc::new(
                    MongoSubmissionRepository::new(&db, collection),
                )))
            }
            None => {
                log::warn!(
                    "Record store credentials not fully configured. Data storage will be disabled."
                );
                Ok(StoreBackend::Unavailable)
            }
        }
    }

    pub fn from_parts(config: Config, generation: GenerationBackend, store: StoreBackend) -> Self {
        let model_service = Arc::new(ModelService::new(generation));
        let submission_service = Arc::new(SubmissionService::new(store));
        let prompt_service = Arc::new(PromptService::new(
            model_service.clone(),
            submission_service.clone(),
        ));
        let analysis_service = Arc::new(AnalysisService::new(
            model_service.clone(),
            config.instructions.clone(),
        ));
        let admin_gate = Arc::new(AdminGate::new(config.admin_secret.clone()));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.admin_session_hours,
        ));

        Self {
            model_service,
            submission_service,
            prompt_service,
            analysis_service,
            admin_gate,
            jwt_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[actix_rt::test]
    async fn test_unconfigured_store_resolves_to_unavailable() {
        let state = AppState::new(Config::test_config()).await.unwrap();

        assert!(state.model_service.is_available());
        assert!(!state.submission_service.is_available());
    }
}
