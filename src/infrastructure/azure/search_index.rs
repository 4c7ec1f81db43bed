use crate::domain::entities::knowledge_record::KnowledgeRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::search_index::{SearchIndex, VectorSearchRequest, EMBEDDING_FIELD};
use crate::domain::values::search_hit::SearchHit;
use crate::infrastructure::http::{build_client, trim_base};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2023-07-01-Preview";

/// Azure AI Search REST adapter for a single index.
pub struct AzureSearchIndex {
    client: Client,
    endpoint: String,
    api_key: String,
    index_name: String,
    api_version: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Option<Vec<SearchHit>>,
}

#[derive(Serialize)]
struct UploadBatch<'a> {
    value: Vec<UploadAction<'a>>,
}

#[derive(Serialize)]
struct UploadAction<'a> {
    #[serde(rename = "@search.action")]
    action: &'static str,
    #[serde(flatten)]
    record: &'a KnowledgeRecord,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    value: Vec<UploadStatus>,
}

#[derive(Deserialize)]
struct UploadStatus {
    key: String,
    status: bool,
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

impl AzureSearchIndex {
    pub fn new(
        endpoint: &str,
        api_key: String,
        index_name: String,
        api_version: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: build_client(timeout),
            endpoint: trim_base(endpoint),
            api_key,
            index_name,
            api_version: api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn index_url(&self) -> String {
        format!(
            "{}/indexes/{}?api-version={}",
            self.endpoint, self.index_name, self.api_version
        )
    }

    fn docs_url(&self, action: &str) -> String {
        format!(
            "{}/indexes/{}/docs/{action}?api-version={}",
            self.endpoint, self.index_name, self.api_version
        )
    }

    fn index_definition(&self, dimensions: usize) -> serde_json::Value {
        let text_field = |name: &str| {
            serde_json::json!({
                "name": name,
                "type": "Edm.String",
                "searchable": true,
                "filterable": true,
                "sortable": true,
                "facetable": true
            })
        };
        serde_json::json!({
            "name": self.index_name,
            "fields": [
                {
                    "name": "id",
                    "type": "Edm.String",
                    "key": true,
                    "filterable": true,
                    "sortable": true,
                    "facetable": true
                },
                text_field("category"),
                text_field("problem"),
                text_field("solution"),
                {
                    "name": EMBEDDING_FIELD,
                    "type": "Collection(Edm.Single)",
                    "searchable": true,
                    "dimensions": dimensions,
                    "vectorSearchConfiguration": "default"
                }
            ],
            "vectorSearch": {
                "algorithmConfigurations": [
                    { "name": "default", "kind": "hnsw" }
                ]
            }
        })
    }

    async fn transport_error(resp: Response) -> DomainError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        DomainError::SearchTransport { status, body }
    }
}

#[async_trait::async_trait]
impl SearchIndex for AzureSearchIndex {
    async fn search(&self, request: &VectorSearchRequest) -> Result<Vec<SearchHit>, DomainError> {
        tracing::debug!(index = %self.index_name, filter = %request.filter, "vector search");

        let resp = self
            .client
            .post(self.docs_url("search"))
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::Search(format!("Azure Search request failed: {e}")))?;

        if resp.status() != StatusCode::OK {
            return Err(Self::transport_error(resp).await);
        }

        let result: SearchResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Search(format!("Azure Search response parse error: {e}")))?;
        Ok(result.value.unwrap_or_default())
    }

    async fn recreate(&self, dimensions: usize) -> Result<(), DomainError> {
        let resp = self
            .client
            .delete(self.index_url())
            .header("api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| DomainError::Search(format!("Azure Search request failed: {e}")))?;
        match resp.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(index = %self.index_name, "index did not exist");
            }
            s if s.is_success() => {
                tracing::warn!(index = %self.index_name, "deleted existing index to apply new schema");
            }
            _ => return Err(Self::transport_error(resp).await),
        }

        let resp = self
            .client
            .put(self.index_url())
            .header("api-key", &self.api_key)
            .json(&self.index_definition(dimensions))
            .send()
            .await
            .map_err(|e| DomainError::Search(format!("Azure Search request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(Self::transport_error(resp).await);
        }

        tracing::info!(index = %self.index_name, dimensions, "index created");
        Ok(())
    }

    async fn upload(&self, records: &[KnowledgeRecord]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let batch = UploadBatch {
            value: records
                .iter()
                .map(|record| UploadAction { action: "upload", record })
                .collect(),
        };

        let resp = self
            .client
            .post(self.docs_url("index"))
            .header("api-key", &self.api_key)
            .json(&batch)
            .send()
            .await
            .map_err(|e| DomainError::Search(format!("Azure Search request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::transport_error(resp).await);
        }

        // 207 carries per-document outcomes; 200 means every document landed.
        let result: UploadResponse = match resp.json().await {
            Ok(result) => result,
            Err(e) if status == StatusCode::MULTI_STATUS => {
                return Err(DomainError::Search(format!(
                    "Azure Search returned an unreadable 207 body for {} documents: {e}",
                    records.len()
                )));
            }
            Err(_) => UploadResponse { value: vec![] },
        };
        let failed: Vec<String> = result
            .value
            .into_iter()
            .filter(|s| !s.status)
            .map(|s| match s.error_message {
                Some(msg) => format!("{} ({msg})", s.key),
                None => s.key,
            })
            .collect();
        if !failed.is_empty() {
            return Err(DomainError::Search(format!(
                "failed to index documents: {}",
                failed.join(", ")
            )));
        }
        Ok(())
    }
}
