use crate::application::embed::EmbedUseCase;
use crate::domain::entities::knowledge_record::RawRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::InputType;
use crate::domain::ports::search_index::SearchIndex;
use crate::domain::values::dimensions::VECTOR_DIMENSIONS;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

pub const UPLOAD_BATCH_SIZE: usize = 10;

pub struct PopulateUseCase {
    embedder: EmbedUseCase,
    index: Arc<dyn SearchIndex>,
}

impl PopulateUseCase {
    pub fn new(embedder: EmbedUseCase, index: Arc<dyn SearchIndex>) -> Self {
        Self { embedder, index }
    }

    pub async fn create_index(&self) -> Result<(), DomainError> {
        let provider_dim = self.embedder.dimension();
        if provider_dim != VECTOR_DIMENSIONS {
            return Err(DomainError::DimensionMismatch {
                expected: VECTOR_DIMENSIONS,
                actual: provider_dim,
            });
        }
        self.index.recreate(VECTOR_DIMENSIONS).await
    }

    /// Embed each record's problem text and upload in batches of ten.
    /// Returns the number of records uploaded.
    pub async fn execute(&self, records: Vec<RawRecord>) -> Result<usize, DomainError> {
        if records.is_empty() {
            return Err(DomainError::InvalidInput("no records to upload".into()));
        }
        let mut seen = HashSet::new();
        for r in &records {
            r.validate()?;
            if !seen.insert(r.id.as_str()) {
                return Err(DomainError::InvalidInput(format!("duplicate record id: {}", r.id)));
            }
        }

        let total = records.len();
        let mut uploaded = 0;
        for chunk in records.chunks(UPLOAD_BATCH_SIZE) {
            let texts: Vec<String> = chunk.iter().map(|r| r.problem.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts, InputType::Document).await?;

            let batch = chunk
                .iter()
                .cloned()
                .zip(vectors)
                .map(|(raw, vector)| raw.with_embedding(vector))
                .collect::<Result<Vec<_>, _>>()?;

            self.index.upload(&batch).await?;
            uploaded += batch.len();
            tracing::info!(uploaded, total, "uploaded batch");
        }

        Ok(uploaded)
    }
}

/// Read a knowledge-base file: a JSON array of `{id, category, problem, solution}`.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, DomainError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| DomainError::Parse(format!("{}: {e}", path.display())))
}
