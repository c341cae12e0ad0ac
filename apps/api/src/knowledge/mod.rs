//! Market knowledge base: static seed documents queried by nearest-neighbour lookup.
//!
//! Built once at startup (seed data, then an optional JSON file upserted on top) and
//! shared read-only through `AppState`. Similarity is cosine over tf-idf term vectors.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod seed;
pub mod vector;

use vector::{compare_scored, inverse_document_frequency, term_counts, TermVector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: f32,
}

#[derive(Debug)]
struct IndexedDocument {
    document: Document,
    counts: HashMap<String, u32>,
}

#[derive(Debug, Default)]
pub struct KnowledgeBase {
    documents: Vec<IndexedDocument>,
}

impl KnowledgeBase {
    /// Knowledge base holding only the built-in seed documents.
    pub fn seeded() -> Self {
        let mut kb = Self::default();
        kb.upsert(seed::seed_documents());
        kb
    }

    /// Seeds, then upserts the documents of `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut kb = Self::seeded();
        if let Some(path) = path {
            let (inserted, updated) = kb.upsert_from_file(path)?;
            info!(
                "Knowledge base file {}: {} new, {} updated",
                path.display(),
                inserted,
                updated
            );
        }
        info!("Knowledge base ready with {} documents", kb.len());
        Ok(kb)
    }

    /// Reads a JSON array of documents and upserts them.
    pub fn upsert_from_file(&mut self, path: &Path) -> Result<(usize, usize)> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base file {}", path.display()))?;
        let documents: Vec<Document> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid knowledge base file {}", path.display()))?;
        Ok(self.upsert(documents))
    }

    /// Adds new documents and replaces existing ones with the same id.
    /// Returns `(inserted, updated)`.
    pub fn upsert(&mut self, documents: Vec<Document>) -> (usize, usize) {
        let mut inserted = 0;
        let mut updated = 0;
        for document in documents {
            let indexed = IndexedDocument {
                counts: term_counts(&document.content),
                document,
            };
            match self
                .documents
                .iter_mut()
                .find(|d| d.document.id == indexed.document.id)
            {
                Some(existing) => {
                    *existing = indexed;
                    updated += 1;
                }
                None => {
                    self.documents.push(indexed);
                    inserted += 1;
                }
            }
        }
        (inserted, updated)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Up to `n` documents most similar to `text`. Documents sharing no term are never returned.
    pub fn search(&self, text: &str, n: usize) -> Vec<ScoredDocument<'_>> {
        if n == 0 || self.documents.is_empty() {
            return Vec::new();
        }

        let idf = inverse_document_frequency(self.documents.iter().map(|d| &d.counts));
        let query = TermVector::weighted(&term_counts(text), &idf);
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(String, f32)> = self
            .documents
            .iter()
            .map(|d| {
                let vector = TermVector::weighted(&d.counts, &idf);
                (d.document.id.clone(), query.cosine(&vector))
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();
        scored.sort_by(compare_scored);
        scored.truncate(n);

        scored
            .into_iter()
            .filter_map(|(id, score)| {
                self.documents
                    .iter()
                    .find(|d| d.document.id == id)
                    .map(|d| ScoredDocument {
                        document: &d.document,
                        score,
                    })
            })
            .collect()
    }

    /// Contents of the `n` nearest documents.
    pub fn query(&self, text: &str, n: usize) -> Vec<String> {
        self.search(text, n)
            .into_iter()
            .map(|hit| hit.document.content.clone())
            .collect()
    }
}
