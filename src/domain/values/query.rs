use crate::domain::values::category_filter::CategoryFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub category: String,
}

impl Query {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::new(&self.category)
    }
}
