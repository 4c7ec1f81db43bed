use crate::application::embed::EmbedUseCase;
use crate::domain::error::DomainError;
use crate::domain::ports::search_index::{SearchIndex, VectorSearchRequest, TOP_K};
use crate::domain::ports::solution_lookup::SolutionLookup;
use crate::domain::values::query::Query;
use crate::domain::values::retrieval_result::RetrievalResult;
use crate::domain::values::search_hit::SearchHit;
use async_trait::async_trait;
use std::sync::Arc;

pub const TOOL_NAME: &str = "search_similar_solution";

pub struct RetrieveUseCase {
    embedder: EmbedUseCase,
    index: Arc<dyn SearchIndex>,
    min_score: Option<f64>,
}

impl RetrieveUseCase {
    pub fn new(embedder: EmbedUseCase, index: Arc<dyn SearchIndex>, min_score: Option<f64>) -> Self {
        Self { embedder, index, min_score }
    }

    /// Embed `query`, then run a k=3 vector search restricted to `category`.
    ///
    /// Embedding failures are returned as errors and the index is never
    /// contacted. Search failures become [`RetrievalResult::SearchFailed`].
    pub async fn retrieve(&self, query: &str, category: &str) -> Result<RetrievalResult, DomainError> {
        let query = Query::new(query, category);
        let vector = self.embedder.embed(&query.text).await?;
        let request = VectorSearchRequest::new(vector, &query.filter());

        match self.index.search(&request).await {
            Ok(hits) => Ok(RetrievalResult::from_hits(self.apply_cutoff(hits))),
            Err(DomainError::SearchTransport { status, body }) => {
                tracing::warn!(status, category = %query.category, "search service rejected request");
                Ok(RetrievalResult::SearchFailed(body))
            }
            Err(DomainError::Search(msg)) => {
                tracing::warn!(error = %msg, category = %query.category, "search request failed");
                Ok(RetrievalResult::SearchFailed(msg))
            }
            Err(e) => Err(e),
        }
    }

    fn apply_cutoff(&self, mut hits: Vec<SearchHit>) -> Vec<SearchHit> {
        hits.truncate(TOP_K);
        if let Some(min) = self.min_score {
            hits.retain(|h| h.score.map_or(true, |s| s >= min));
        }
        hits
    }
}

#[async_trait]
impl SolutionLookup for RetrieveUseCase {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Find up to three known solutions for an IT problem within a ticket category"
    }

    async fn call(&self, query: &str, category: &str) -> Result<String, DomainError> {
        Ok(self.retrieve(query, category).await?.to_string())
    }
}
