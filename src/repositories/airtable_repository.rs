use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    errors::StoreError,
    models::domain::{StoredSubmission, SubmissionRecord},
    repositories::SubmissionRepository,
};

/// Record store backed by an Airtable table, one row per submission.
pub struct AirtableSubmissionRepository {
    http_client: Client,
    api_key: SecretString,
    table_url: Url,
}

#[derive(Debug, Serialize)]
struct CreateRecordBody<'a> {
    fields: &'a SubmissionRecord,
}

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(default)]
    fields: SubmissionRecord,
}

#[derive(Debug, Deserialize)]
struct ListRecordsPage {
    #[serde(default)]
    records: Vec<AirtableRecord>,
    #[serde(default)]
    offset: Option<String>,
}

impl AirtableSubmissionRepository {
    pub fn new(
        api_url: &str,
        api_key: SecretString,
        base_id: &str,
        table_name: &str,
    ) -> Result<Self, StoreError> {
        let table_url = table_url(api_url, base_id, table_name)?;
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            table_url,
        })
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<ListRecordsPage, StoreError> {
        let mut request = self
            .http_client
            .get(self.table_url.clone())
            .bearer_auth(self.api_key.expose_secret());
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ProviderError(format!(
                "Airtable list returned {}: {}",
                status, body
            )));
        }

        Ok(response.json::<ListRecordsPage>().await?)
    }
}

fn table_url(api_url: &str, base_id: &str, table_name: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(api_url)
        .map_err(|e| StoreError::ProviderError(format!("Invalid Airtable API URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| StoreError::ProviderError("Airtable API URL cannot be a base".to_string()))?
        .pop_if_empty()
        .push(base_id)
        .push(table_name);
    Ok(url)
}

#[async_trait]
impl SubmissionRepository for AirtableSubmissionRepository {
    async fn create(&self, record: SubmissionRecord) -> Result<String, StoreError> {
        let response = self
            .http_client
            .post(self.table_url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&CreateRecordBody { fields: &record })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ProviderError(format!(
                "Airtable create returned {}: {}",
                status, body
            )));
        }

        let created: AirtableRecord = response.json().await?;
        Ok(created.id)
    }

    async fn list_all(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        let mut submissions = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.fetch_page(offset.as_deref()).await?;
            submissions.extend(
                page.records
                    .into_iter()
                    .map(|record| StoredSubmission::new(record.id, record.fields)),
            );

            match page.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        Ok(submissions)
    }
}
