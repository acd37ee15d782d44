//! Nearest reference chunks for a student chunk.
//!
//! Chunks are compared by the identifiers they mention: the similarity of
//! two chunks is the Jaccard index of their identifier sets. Ties go to the
//! reference chunk that comes first.

use std::collections::BTreeSet;

/// Reference chunks prepared for lookup
#[derive(Clone, Debug, Default)]
pub struct ReferenceIndex {
    chunks: Vec<String>,
    tokens: Vec<BTreeSet<String>>,
}

/// A reference chunk and how close it is to the query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match<'a> {
    /// The reference chunk
    pub chunk: &'a str,
    /// Jaccard similarity in `0.0..=1.0`
    pub similarity: f64,
}

impl ReferenceIndex {
    /// Indexes `chunks`, keeping their order
    #[must_use]
    pub fn new(chunks: Vec<String>) -> Self {
        let tokens = chunks.iter().map(|chunk| identifiers(chunk)).collect();
        Self { chunks, tokens }
    }

    /// Number of indexed chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Up to `k` reference chunks, most similar first
    #[must_use]
    pub fn nearest(&self, query: &str, k: usize) -> Vec<Match<'_>> {
        let query = identifiers(query);

        let mut ranked: Vec<Match<'_>> = self
            .chunks
            .iter()
            .zip(&self.tokens)
            .map(|(chunk, tokens)| Match {
                chunk,
                similarity: jaccard(&query, tokens),
            })
            .collect();
        // Stable sort keeps earlier chunks first on ties
        ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        ranked.truncate(k);
        ranked
    }
}

/// Identifier-like tokens of `text`
fn identifiers(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|token| token.chars().next().is_some_and(|c| !c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
