use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A matched document projected to the selected fields.
///
/// The service may omit or null any field; those render as empty text
/// rather than failing the whole result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub problem: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub solution: Option<String>,
    #[serde(rename = "@search.score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

// Numbers and bools print as text; null, arrays and objects become absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    })
}

impl SearchHit {
    pub fn new(category: &str, problem: &str, solution: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            problem: Some(problem.to_string()),
            solution: Some(solution.to_string()),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Render as a numbered block; `rank` starts at 1.
    pub fn render(&self, rank: usize) -> String {
        format!(
            "\nResult {rank}:\nCategory: {}\nProblem: {}\nSolution: {}\n",
            self.category.as_deref().unwrap_or_default(),
            self.problem.as_deref().unwrap_or_default(),
            self.solution.as_deref().unwrap_or_default(),
        )
    }
}
