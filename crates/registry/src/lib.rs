//! # copycheck registry
//!
//! In-memory store that decides which document *owns* a fingerprint and keeps
//! the latest [`AnalysisResult`] per document.
//!
//! ## Ownership
//!
//! The first document to claim a fingerprint becomes its owner, and that
//! assignment never changes for the life of the process.
//! [`FingerprintRegistry::claim_or_lookup`] performs the check and the insert
//! under a single shard lock, so among any number of concurrent claims for the
//! same fingerprint exactly one sees `None`.
//!
//! ## Results
//!
//! Results are keyed by document id and overwritten on every put. Reads and
//! writes for different ids land on different shards and do not contend.
//!
//! Nothing here does I/O, so no operation returns an error. State is lost on
//! restart.
//!
//! ```
//! use analyzer::compute_fingerprint;
//! use registry::FingerprintRegistry;
//!
//! let registry = FingerprintRegistry::new();
//! let fp = compute_fingerprint("same words");
//!
//! assert_eq!(registry.claim_or_lookup(&fp, "a.txt"), None);
//! assert_eq!(registry.claim_or_lookup(&fp, "b.txt").as_deref(), Some("a.txt"));
//! ```

mod types;

pub use crate::types::AnalysisResult;

use analyzer::Fingerprint;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Fingerprint ownership plus the latest analysis result per document.
#[derive(Debug, Default)]
pub struct FingerprintRegistry {
    /// fingerprint -> first document id that claimed it
    owners: DashMap<Fingerprint, String>,
    /// document id -> latest result
    results: DashMap<String, AnalysisResult>,
}

impl FingerprintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `fingerprint` for `candidate_owner`, or report who already owns it.
    ///
    /// Returns `None` when the candidate is now the owner. Returns the existing
    /// owner, without touching state, when the fingerprint was claimed before.
    /// The existing owner may equal `candidate_owner` when a document is
    /// analyzed again.
    pub fn claim_or_lookup(&self, fingerprint: &Fingerprint, candidate_owner: &str) -> Option<String> {
        match self.owners.entry(fingerprint.clone()) {
            Entry::Occupied(entry) => Some(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(candidate_owner.to_owned());
                tracing::debug!(
                    fingerprint = %fingerprint.short(),
                    owner = %candidate_owner,
                    "fingerprint claimed"
                );
                None
            }
        }
    }

    /// Current owner of `fingerprint`, if any.
    pub fn owner_of(&self, fingerprint: &Fingerprint) -> Option<String> {
        self.owners.get(fingerprint).map(|owner| owner.value().clone())
    }

    /// Store `result` under `document_id`, replacing any earlier result.
    pub fn put(&self, document_id: &str, result: AnalysisResult) {
        self.results.insert(document_id.to_owned(), result);
    }

    pub fn get(&self, document_id: &str) -> Option<AnalysisResult> {
        self.results.get(document_id).map(|r| r.value().clone())
    }

    /// Snapshot of every stored result, in no particular order.
    pub fn list_all(&self) -> Vec<AnalysisResult> {
        self.results.iter().map(|r| r.value().clone()).collect()
    }

    /// Number of fingerprints with an owner.
    pub fn fingerprint_count(&self) -> usize {
        self.owners.len()
    }

    /// Number of documents with a stored result.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::{compute_fingerprint, compute_statistics};

    fn result_for(id: &str, text: &str) -> AnalysisResult {
        AnalysisResult::original(id, compute_statistics(text), compute_fingerprint(text))
    }

    #[test]
    fn first_claim_wins() {
        let registry = FingerprintRegistry::new();
        let fp = compute_fingerprint("content");

        assert_eq!(registry.claim_or_lookup(&fp, "first"), None);
        assert_eq!(registry.claim_or_lookup(&fp, "second"), Some("first".to_string()));
        assert_eq!(registry.claim_or_lookup(&fp, "third"), Some("first".to_string()));
        assert_eq!(registry.owner_of(&fp), Some("first".to_string()));
        assert_eq!(registry.fingerprint_count(), 1);
    }

    #[test]
    fn reclaim_by_owner_reports_owner() {
        let registry = FingerprintRegistry::new();
        let fp = compute_fingerprint("content");

        assert_eq!(registry.claim_or_lookup(&fp, "doc"), None);
        assert_eq!(registry.claim_or_lookup(&fp, "doc"), Some("doc".to_string()));
    }

    #[test]
    fn distinct_fingerprints_have_distinct_owners() {
        let registry = FingerprintRegistry::new();
        let a = compute_fingerprint("alpha");
        let b = compute_fingerprint("beta");

        assert_eq!(registry.claim_or_lookup(&a, "a"), None);
        assert_eq!(registry.claim_or_lookup(&b, "b"), None);
        assert_eq!(registry.fingerprint_count(), 2);
    }

    #[test]
    fn empty_fingerprint_is_an_ordinary_key() {
        let registry = FingerprintRegistry::new();
        let empty = compute_fingerprint("");

        assert_eq!(registry.claim_or_lookup(&empty, "blank-1"), None);
        assert_eq!(
            registry.claim_or_lookup(&empty, "blank-2"),
            Some("blank-1".to_string())
        );
    }

    #[test]
    fn put_overwrites_and_get_reads_back() {
        let registry = FingerprintRegistry::new();
        assert!(registry.get("doc").is_none());

        registry.put("doc", result_for("doc", "first version"));
        registry.put("doc", result_for("doc", "second version"));

        let stored = registry.get("doc").unwrap();
        assert_eq!(stored.fingerprint, compute_fingerprint("second version"));
        assert_eq!(registry.result_count(), 1);
    }

    #[test]
    fn list_all_returns_every_result() {
        let registry = FingerprintRegistry::new();
        registry.put("a", result_for("a", "one"));
        registry.put("b", result_for("b", "two"));

        let mut ids: Vec<_> = registry
            .list_all()
            .into_iter()
            .map(|r| r.document_id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
