//! Shared test doubles for the embedding and search ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use ticketkb::domain::entities::knowledge_record::{KnowledgeRecord, RawRecord};
use ticketkb::domain::error::DomainError;
use ticketkb::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use ticketkb::domain::ports::search_index::{SearchIndex, VectorSearchRequest};
use ticketkb::domain::values::dimensions::VECTOR_DIMENSIONS;
use ticketkb::domain::values::search_hit::SearchHit;
use ticketkb::TicketKb;

/// Ordered record of port calls, shared between doubles.
pub type EventLog = Arc<Mutex<Vec<&'static str>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct StubEmbedder {
    default: Vec<f32>,
    by_text: HashMap<String, Vec<f32>>,
    failure: Option<String>,
    dimension: usize,
    pub calls: Mutex<Vec<(Vec<String>, InputType)>>,
    events: EventLog,
}

impl StubEmbedder {
    pub fn constant(value: f32, events: EventLog) -> Self {
        Self {
            default: vec![value; VECTOR_DIMENSIONS],
            by_text: HashMap::new(),
            failure: None,
            dimension: VECTOR_DIMENSIONS,
            calls: Mutex::new(Vec::new()),
            events,
        }
    }

    pub fn failing(msg: &str, events: EventLog) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::constant(0.0, events)
        }
    }

    /// Returns vectors of the wrong width while still reporting 768.
    pub fn short(len: usize, events: EventLog) -> Self {
        Self {
            default: vec![0.1; len],
            ..Self::constant(0.0, events)
        }
    }

    pub fn with_text(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.by_text.insert(text.to_string(), vector);
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        self.events.lock().unwrap().push("embed");
        self.calls.lock().unwrap().push((texts.to_vec(), input_type));
        if let Some(msg) = &self.failure {
            return Err(DomainError::Embedding(msg.clone()));
        }
        Ok(texts
            .iter()
            .map(|t| self.by_text.get(t).cloned().unwrap_or_else(|| self.default.clone()))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

pub enum SearchOutcome {
    Hits(Vec<SearchHit>),
    Transport(u16, String),
    Network(String),
}

/// Canned search responses; records every request it sees.
pub struct StubIndex {
    outcome: SearchOutcome,
    pub requests: Mutex<Vec<VectorSearchRequest>>,
    pub uploads: Mutex<Vec<Vec<KnowledgeRecord>>>,
    pub recreated: Mutex<Vec<usize>>,
    events: EventLog,
}

impl StubIndex {
    pub fn new(outcome: SearchOutcome, events: EventLog) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            recreated: Mutex::new(Vec::new()),
            events,
        }
    }

    pub fn hits(hits: Vec<SearchHit>, events: EventLog) -> Self {
        Self::new(SearchOutcome::Hits(hits), events)
    }

    pub fn search_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> VectorSearchRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl SearchIndex for StubIndex {
    async fn search(&self, request: &VectorSearchRequest) -> Result<Vec<SearchHit>, DomainError> {
        self.events.lock().unwrap().push("search");
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            SearchOutcome::Hits(hits) => Ok(hits.clone()),
            SearchOutcome::Transport(status, body) => Err(DomainError::SearchTransport {
                status: *status,
                body: body.clone(),
            }),
            SearchOutcome::Network(msg) => Err(DomainError::Search(msg.clone())),
        }
    }

    async fn recreate(&self, dimensions: usize) -> Result<(), DomainError> {
        self.recreated.lock().unwrap().push(dimensions);
        Ok(())
    }

    async fn upload(&self, records: &[KnowledgeRecord]) -> Result<(), DomainError> {
        self.uploads.lock().unwrap().push(records.to_vec());
        Ok(())
    }
}

/// Brute-force index: exact category filter, cosine ranking, top k.
#[derive(Default)]
pub struct MemoryIndex {
    records: Mutex<Vec<KnowledgeRecord>>,
}

impl MemoryIndex {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn filter_category(filter: &str) -> Option<String> {
        filter
            .strip_prefix("category eq '")
            .and_then(|rest| rest.strip_suffix('\''))
            .map(|lit| lit.replace("''", "'"))
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 { 0.0 } else { dot / denom }
    }
}

#[async_trait::async_trait]
impl SearchIndex for MemoryIndex {
    async fn search(&self, request: &VectorSearchRequest) -> Result<Vec<SearchHit>, DomainError> {
        let category = Self::filter_category(&request.filter)
            .ok_or_else(|| DomainError::Search(format!("bad filter: {}", request.filter)))?;
        let query = &request.vectors[0];
        let records = self.records.lock().unwrap();

        let mut scored: Vec<(f64, &KnowledgeRecord)> = records
            .iter()
            .filter(|r| r.category == category)
            .map(|r| (Self::cosine_similarity(&query.value, &r.embedding), r))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(query.k);

        Ok(scored
            .into_iter()
            .map(|(score, r)| SearchHit::new(&r.category, &r.problem, &r.solution).with_score(score))
            .collect())
    }

    async fn recreate(&self, _dimensions: usize) -> Result<(), DomainError> {
        self.records.lock().unwrap().clear();
        Ok(())
    }

    async fn upload(&self, records: &[KnowledgeRecord]) -> Result<(), DomainError> {
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

pub fn setup(embedder: StubEmbedder, index: StubIndex) -> (TicketKb, Arc<StubEmbedder>, Arc<StubIndex>) {
    let embedder = Arc::new(embedder);
    let index = Arc::new(index);
    let kb = TicketKb::with_providers(embedder.clone(), index.clone(), None).unwrap();
    (kb, embedder, index)
}

pub fn raw(id: &str, category: &str, problem: &str, solution: &str) -> RawRecord {
    RawRecord {
        id: id.to_string(),
        category: category.to_string(),
        problem: problem.to_string(),
        solution: solution.to_string(),
    }
}

/// Unit vector along `axis`, padded to full width.
pub fn axis(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; VECTOR_DIMENSIONS];
    v[axis] = 1.0;
    v
}
