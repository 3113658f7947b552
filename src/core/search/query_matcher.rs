// Keyword matching over the dataset snapshot.
// Deliberately simple: an explicit tokenizer plus a row predicate, so the
// match semantics stay testable in isolation. No ranking, no fuzziness.

use thiserror::Error;

use crate::core::dataset::{Row, TabularDataset};

/// Hard cap on returned rows so a broad query cannot flood the chat.
pub const MAX_MATCH_ROWS: usize = 20;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("the query is empty")]
    InvalidQuery,
}

/// Matching rows in dataset order, capped at [`MAX_MATCH_ROWS`].
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub rows: Vec<Row>,
    /// How many rows matched before truncation.
    pub total_matches: usize,
    pub truncated: bool,
}

/// Lowercase the query and split it into whitespace-delimited keyword tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|token| token.to_lowercase())
        .collect()
}

fn row_matches(row: &Row, tokens: &[String]) -> bool {
    row.cells().iter().any(|cell| {
        let cell = cell.to_lowercase();
        tokens.iter().any(|token| cell.contains(token.as_str()))
    })
}

/// Find the rows relevant to a free-text query.
///
/// A row matches if ANY keyword token appears as a case-insensitive
/// substring of ANY cell (OR across tokens, OR across columns). Rows come
/// back in dataset order. A zero-row dataset yields an empty result; an
/// empty or whitespace-only query is `InvalidQuery`.
pub fn matches(query: &str, dataset: &TabularDataset) -> Result<MatchResult, SearchError> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Err(SearchError::InvalidQuery);
    }

    let mut rows = Vec::new();
    let mut total_matches = 0;
    for row in dataset.rows() {
        if row_matches(row, &tokens) {
            total_matches += 1;
            if rows.len() < MAX_MATCH_ROWS {
                rows.push(row.clone());
            }
        }
    }

    Ok(MatchResult {
        truncated: total_matches > rows.len(),
        total_matches,
        rows,
    })
}
