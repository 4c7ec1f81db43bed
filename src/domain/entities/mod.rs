pub mod knowledge_record;
