#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::{StoredSubmission, SubmissionRecord},
        dto::request::GeneratePromptRequest,
    };

    /// A complete, valid form submission.
    pub fn generate_request() -> GeneratePromptRequest {
        GeneratePromptRequest {
            goal: "Write a haiku".to_string(),
            context: "about autumn".to_string(),
            format: "3 lines".to_string(),
            tone: "Casual".to_string(),
            constraints: String::new(),
        }
    }

    /// A stored row with the given generated prompt.
    pub fn stored(record_id: &str, prompt: Option<&str>) -> StoredSubmission {
        StoredSubmission::new(
            record_id,
            SubmissionRecord {
                goal: "Write a haiku".to_string(),
                tone: "Casual".to_string(),
                generated_prompt: prompt.map(str::to_string),
                ..Default::default()
            },
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_generate_request() {
        let request = generate_request();
        assert_eq!(request.goal, "Write a haiku");
        assert_eq!(request.tone, "Casual");
    }

    #[test]
    fn test_fixtures_stored() {
        assert_eq!(stored("rec1", Some("p")).usable_prompt(), Some("p"));
        assert_eq!(stored("rec2", None).usable_prompt(), None);
    }
}
