pub mod embedding_port;
pub mod search_index;
pub mod solution_lookup;
