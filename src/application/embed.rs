use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::values::dimensions::ensure_dimension;
use std::sync::Arc;

/// Turns text into index-compatible vectors. No caching and no retries;
/// every call goes to the provider.
#[derive(Clone)]
pub struct EmbedUseCase {
    provider: Arc<dyn EmbeddingProvider>,
}

impl EmbedUseCase {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let mut vectors = self.embed_batch(&[text.to_string()], InputType::Query).await?;
        vectors
            .pop()
            .ok_or_else(|| DomainError::Embedding("provider returned no embedding".into()))
    }

    pub async fn embed_batch(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(DomainError::Embedding("cannot embed empty text".into()));
        }

        let vectors = self.provider.embed(texts, input_type).await?;
        if vectors.len() != texts.len() {
            return Err(DomainError::Embedding(format!(
                "expected {} embeddings, provider returned {}",
                texts.len(),
                vectors.len()
            )));
        }
        for v in &vectors {
            ensure_dimension(v)?;
        }
        Ok(vectors)
    }

    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }
}
