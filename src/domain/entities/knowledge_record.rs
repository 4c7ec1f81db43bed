use crate::domain::error::DomainError;
use crate::domain::values::dimensions::ensure_dimension;
use serde::{Deserialize, Serialize};

/// A knowledge-base row as it appears in the source JSON file, before embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub category: String,
    pub problem: String,
    pub solution: String,
}

impl RawRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidInput("record id must not be empty".into()));
        }
        if self.problem.trim().is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "record {} has an empty problem",
                self.id
            )));
        }
        Ok(())
    }

    /// Attach an embedding, producing an indexable record.
    pub fn with_embedding(self, embedding: Vec<f32>) -> Result<KnowledgeRecord, DomainError> {
        ensure_dimension(&embedding)?;
        Ok(KnowledgeRecord {
            id: self.id,
            category: self.category,
            problem: self.problem,
            solution: self.solution,
            embedding,
        })
    }
}

/// An indexed problem/solution pair. Immutable once uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub id: String,
    pub category: String,
    pub problem: String,
    pub solution: String,
    pub embedding: Vec<f32>,
}
