use super::fuzzy_matcher::{tokenize, FuzzyMatcher};
use crate::inventory::domain::SoftwareRecord;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Default number of hits returned per query
pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// Searchable form of one catalog entry
#[derive(Debug, Clone)]
pub struct SearchDocument {
    /// Lower-cased name, also the identity key
    pub key: String,
    pub description: String,
    pub tokens: Vec<String>,
}

impl SearchDocument {
    fn from_record(record: &SoftwareRecord) -> Self {
        let mut tokens = tokenize(&record.name);
        tokens.extend(tokenize(record.description_str()));

        Self {
            key: record.identity_key(),
            description: record.description_str().to_lowercase(),
            tokens,
        }
    }
}

/// Size and age of the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub document_count: usize,
    pub built_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct IndexSnapshot {
    records: Vec<SoftwareRecord>,
    documents: Vec<SearchDocument>,
    built_at: Option<DateTime<Utc>>,
}

/// In-memory search index over a catalog snapshot.
///
/// A rebuild constructs a complete snapshot before swapping it in under the
/// write lock, so a concurrent search sees either the old index or the new
/// one and never a partial build.
#[derive(Debug)]
pub struct CatalogIndex {
    snapshot: RwLock<Arc<IndexSnapshot>>,
    result_limit: usize,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::with_result_limit(DEFAULT_RESULT_LIMIT)
    }

    /// A limit of 0 disables the cap
    pub fn with_result_limit(result_limit: usize) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(IndexSnapshot::default())),
            result_limit,
        }
    }

    /// Replaces the whole index with one built from `entries`
    pub fn rebuild(&self, entries: Vec<SoftwareRecord>) {
        let documents = entries.iter().map(SearchDocument::from_record).collect();
        let fresh = Arc::new(IndexSnapshot {
            records: entries,
            documents,
            built_at: Some(Utc::now()),
        });

        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = fresh;
    }

    /// Case-insensitive search over name and description.
    ///
    /// A blank keyword returns the whole snapshot in its original order.
    /// Otherwise every record containing the keyword is a hit, as is every
    /// record where each query term fuzzily matches some token. Substring
    /// hits come first, then fuzzy hits by increasing distance.
    pub fn search(&self, keyword: &str) -> Vec<SoftwareRecord> {
        let snapshot = self.current();

        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return snapshot.records.clone();
        }
        let terms = tokenize(&needle);

        let mut hits: Vec<(usize, usize)> = snapshot
            .documents
            .iter()
            .enumerate()
            .filter_map(|(position, document)| {
                Self::score(document, &needle, &terms).map(|score| (score, position))
            })
            .collect();
        hits.sort_by_key(|&(score, position)| (score, position));

        let mut seen = HashSet::new();
        let limit = if self.result_limit == 0 {
            usize::MAX
        } else {
            self.result_limit
        };

        hits.into_iter()
            .filter(|&(_, position)| seen.insert(snapshot.documents[position].key.clone()))
            .take(limit)
            .map(|(_, position)| snapshot.records[position].clone())
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        let snapshot = self.current();
        IndexStats {
            document_count: snapshot.documents.len(),
            built_at: snapshot.built_at,
        }
    }

    fn current(&self) -> Arc<IndexSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 0 for a substring hit, 1 + total edit distance for a fuzzy hit
    fn score(document: &SearchDocument, needle: &str, terms: &[String]) -> Option<usize> {
        if document.key.contains(needle) || document.description.contains(needle) {
            return Some(0);
        }
        if terms.is_empty() {
            return None;
        }

        let mut total = 0;
        for term in terms {
            let distance =
                FuzzyMatcher::best_distance(term, document.tokens.iter().map(String::as_str))?;
            total += distance;
        }
        Some(1 + total)
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
