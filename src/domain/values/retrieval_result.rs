use crate::domain::values::search_hit::SearchHit;
use std::fmt;

/// Returned verbatim when the filtered search matched nothing. Callers
/// (including agents) may match on this exact text.
pub const NO_MATCHES_SENTINEL: &str = "No matching solutions found.";

#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalResult {
    Found(Vec<SearchHit>),
    NoMatches,
    SearchFailed(String),
}

impl RetrievalResult {
    pub fn from_hits(hits: Vec<SearchHit>) -> Self {
        if hits.is_empty() {
            RetrievalResult::NoMatches
        } else {
            RetrievalResult::Found(hits)
        }
    }

    pub fn hits(&self) -> &[SearchHit] {
        match self {
            RetrievalResult::Found(hits) => hits,
            _ => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RetrievalResult::SearchFailed(_))
    }
}

impl fmt::Display for RetrievalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalResult::Found(hits) => {
                for (idx, hit) in hits.iter().enumerate() {
                    f.write_str(&hit.render(idx + 1))?;
                }
                Ok(())
            }
            RetrievalResult::NoMatches => f.write_str(NO_MATCHES_SENTINEL),
            RetrievalResult::SearchFailed(msg) => write!(f, "Error while searching: {msg}"),
        }
    }
}
