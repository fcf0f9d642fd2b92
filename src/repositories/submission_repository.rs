use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson},
    Collection,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    errors::StoreError,
    models::domain::{StoredSubmission, SubmissionRecord},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persists one record and returns the id the store assigned to it.
    async fn create(&self, record: SubmissionRecord) -> Result<String, StoreError>;
    /// Every stored record, in the order the store returns them.
    async fn list_all(&self) -> Result<Vec<StoredSubmission>, StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SubmissionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(flatten)]
    record: SubmissionRecord,
}

pub struct MongoSubmissionRepository {
    collection: Collection<SubmissionDocument>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, record: SubmissionRecord) -> Result<String, StoreError> {
        let document = SubmissionDocument { id: None, record };
        let result = self.collection.insert_one(&document).await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            Bson::String(id) => Ok(id),
            other => Err(StoreError::ProviderError(format!(
                "Unexpected inserted id type: {:?}",
                other
            ))),
        }
    }

    async fn list_all(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<SubmissionDocument> = cursor.try_collect().await?;

        let submissions = documents
            .into_iter()
            .filter_map(|document| match document.id {
                Some(oid) => Some(StoredSubmission::new(oid.to_hex(), document.record)),
                None => {
                    log::warn!("Skipping submission document without an _id");
                    None
                }
            })
            .collect();

        Ok(submissions)
    }
}
