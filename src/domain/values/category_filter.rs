use std::fmt;

/// OData equality filter on the `category` field.
///
/// The category is embedded as a single-quoted string literal, so any `'`
/// inside it is doubled. Matching on the service side is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter(String);

impl CategoryFilter {
    pub fn new(category: &str) -> Self {
        CategoryFilter(category.to_string())
    }

    pub fn category(&self) -> &str {
        &self.0
    }

    pub fn expression(&self) -> String {
        format!("category eq '{}'", self.0.replace('\'', "''"))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}
