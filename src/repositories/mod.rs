pub mod airtable_repository;
pub mod submission_repository;

pub use airtable_repository::AirtableSubmissionRepository;
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
