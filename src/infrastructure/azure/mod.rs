pub mod search_index;
