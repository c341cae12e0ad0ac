use std::cmp::Ordering;
use std::collections::HashMap;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "like",
    "of", "on", "or", "should", "that", "the", "their", "this", "to", "with",
];

/// Lowercased terms of `text`. `+` and `#` stay attached so "C++" and "C#" survive.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(&t.as_str()))
        .filter(|t| t.chars().count() > 1 || t.chars().all(|c| c.is_alphanumeric()))
        .collect()
}

pub fn term_counts(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Sparse, L2-normalised tf-idf vector.
#[derive(Debug, Clone, Default)]
pub struct TermVector(HashMap<String, f32>);

impl TermVector {
    pub fn weighted(counts: &HashMap<String, u32>, idf: &HashMap<String, f32>) -> Self {
        let mut weights: HashMap<String, f32> = counts
            .iter()
            .filter_map(|(term, &count)| {
                let idf = idf.get(term).copied()?;
                let weight = (1.0 + (count as f32).ln()) * idf;
                (weight > 0.0).then(|| (term.clone(), weight))
            })
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
        }
        Self(weights)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cosine similarity; both vectors are already normalised.
    pub fn cosine(&self, other: &TermVector) -> f32 {
        let (small, large) = if self.0.len() <= other.0.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };
        small
            .iter()
            .filter_map(|(term, w)| large.get(term).map(|o| w * o))
            .sum()
    }
}

/// Smoothed inverse document frequency over a corpus of term-count maps.
pub fn inverse_document_frequency<'a, I>(corpus: I) -> HashMap<String, f32>
where
    I: IntoIterator<Item = &'a HashMap<String, u32>>,
{
    let mut doc_freq: HashMap<String, u32> = HashMap::new();
    let mut total = 0u32;
    for counts in corpus {
        total += 1;
        for term in counts.keys() {
            *doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
    }

    doc_freq
        .into_iter()
        .map(|(term, df)| {
            let idf = ((1.0 + total as f32) / (1.0 + df as f32)).ln() + 1.0;
            (term, idf)
        })
        .collect()
}

/// Highest score first; ties broken by ascending id.
pub fn compare_scored(left: &(String, f32), right: &(String, f32)) -> Ordering {
    right
        .1
        .partial_cmp(&left.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| left.0.cmp(&right.0))
}
