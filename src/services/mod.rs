pub mod analysis_service;
pub mod model_service;
pub mod prompt_service;
pub mod submission_service;
