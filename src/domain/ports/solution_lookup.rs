use crate::domain::error::DomainError;
use async_trait::async_trait;

/// A callable tool exposed to a conversational agent: given a problem
/// description and a category, return text describing known solutions.
///
/// Search outages come back as descriptive text so the agent loop can keep
/// going. Only failures that make a lookup impossible (e.g. the query could
/// not be embedded) are returned as errors.
#[async_trait]
pub trait SolutionLookup: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn call(&self, query: &str, category: &str) -> Result<String, DomainError>;
}
