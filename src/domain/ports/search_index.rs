use crate::domain::entities::knowledge_record::KnowledgeRecord;
use crate::domain::error::DomainError;
use crate::domain::values::category_filter::CategoryFilter;
use crate::domain::values::search_hit::SearchHit;
use serde::Serialize;

/// Number of neighbours requested per query.
pub const TOP_K: usize = 3;

pub const EMBEDDING_FIELD: &str = "embedding";

/// Fields returned for each hit. Embeddings are never selected.
pub const SELECT_FIELDS: &str = "category,problem,solution";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorQuery {
    pub value: Vec<f32>,
    pub fields: String,
    pub k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSearchRequest {
    pub search: String,
    pub vectors: Vec<VectorQuery>,
    pub select: String,
    pub filter: String,
}

impl VectorSearchRequest {
    pub fn new(vector: Vec<f32>, filter: &CategoryFilter) -> Self {
        Self {
            search: String::new(),
            vectors: vec![VectorQuery {
                value: vector,
                fields: EMBEDDING_FIELD.to_string(),
                k: TOP_K,
            }],
            select: SELECT_FIELDS.to_string(),
            filter: filter.expression(),
        }
    }
}

#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run a filtered vector search. Hits come back in service rank order.
    async fn search(&self, request: &VectorSearchRequest) -> Result<Vec<SearchHit>, DomainError>;

    /// Drop (if present) and recreate the index schema.
    async fn recreate(&self, dimensions: usize) -> Result<(), DomainError>;

    async fn upload(&self, records: &[KnowledgeRecord]) -> Result<(), DomainError>;
}
