pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::embed::EmbedUseCase;
use crate::application::populate::{load_records, PopulateUseCase};
use crate::application::retrieve::RetrieveUseCase;
use crate::config::{Config, EmbeddingBackend};
use crate::domain::entities::knowledge_record::RawRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::search_index::SearchIndex;
use crate::domain::ports::solution_lookup::SolutionLookup;
use crate::domain::values::dimensions::VECTOR_DIMENSIONS;
use crate::domain::values::retrieval_result::RetrievalResult;
use crate::infrastructure::azure::search_index::AzureSearchIndex;
use crate::infrastructure::embeddings::gemini::GeminiProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use std::path::Path;
use std::sync::Arc;

pub struct TicketKb {
    embed_uc: EmbedUseCase,
    retrieve_uc: Arc<RetrieveUseCase>,
    populate_uc: PopulateUseCase,
}

impl TicketKb {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let emb = &config.embedding;
        let embedder: Arc<dyn EmbeddingProvider> = match emb.backend {
            EmbeddingBackend::Gemini => Arc::new(GeminiProvider::new(
                emb.api_key.clone(),
                emb.model.clone(),
                emb.base_url.clone(),
                config.request_timeout,
            )),
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
                emb.api_key.clone(),
                emb.model.clone(),
                emb.base_url.clone(),
                config.request_timeout,
            )),
        };

        let search = &config.search;
        let index: Arc<dyn SearchIndex> = Arc::new(AzureSearchIndex::new(
            &search.endpoint,
            search.api_key.clone(),
            search.index_name.clone(),
            Some(search.api_version.clone()),
            config.request_timeout,
        ));

        Self::with_providers(embedder, index, config.min_score)
    }

    pub fn with_providers(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn SearchIndex>,
        min_score: Option<f64>,
    ) -> Result<Self, DomainError> {
        let provider_dim = embedder.dimension();
        if provider_dim != VECTOR_DIMENSIONS {
            return Err(DomainError::DimensionMismatch {
                expected: VECTOR_DIMENSIONS,
                actual: provider_dim,
            });
        }

        let embed_uc = EmbedUseCase::new(embedder);
        Ok(Self {
            retrieve_uc: Arc::new(RetrieveUseCase::new(embed_uc.clone(), index.clone(), min_score)),
            populate_uc: PopulateUseCase::new(embed_uc.clone(), index),
            embed_uc,
        })
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.embed_uc.embed(text).await
    }

    pub async fn retrieve(&self, query: &str, category: &str) -> Result<RetrievalResult, DomainError> {
        self.retrieve_uc.retrieve(query, category).await
    }

    /// Text form of [`retrieve`](Self::retrieve), as handed to an agent.
    pub async fn search_similar_solution(&self, query: &str, category: &str) -> Result<String, DomainError> {
        self.retrieve_uc.call(query, category).await
    }

    /// The retriever as a tool capability, for registration with an agent.
    pub fn solution_lookup(&self) -> Arc<dyn SolutionLookup> {
        self.retrieve_uc.clone()
    }

    pub async fn create_index(&self) -> Result<(), DomainError> {
        self.populate_uc.create_index().await
    }

    pub async fn populate(&self, records: Vec<RawRecord>) -> Result<usize, DomainError> {
        self.populate_uc.execute(records).await
    }

    pub async fn populate_from_file(&self, path: &Path) -> Result<usize, DomainError> {
        let records = load_records(path)?;
        tracing::info!(count = records.len(), path = %path.display(), "loaded knowledge base");
        self.populate(records).await
    }
}
