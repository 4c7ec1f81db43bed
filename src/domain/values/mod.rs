pub mod category_filter;
pub mod dimensions;
pub mod query;
pub mod retrieval_result;
pub mod search_hit;
