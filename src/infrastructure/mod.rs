pub mod azure;
pub mod embeddings;
pub mod http;
