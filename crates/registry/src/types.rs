use analyzer::{Fingerprint, TextStatistics};
use serde::{Deserialize, Serialize};

/// Outcome of analyzing one document.
///
/// `original_document_id` is `Some` exactly when `is_duplicate` is true; use
/// [`AnalysisResult::original`] and [`AnalysisResult::duplicate_of`] to keep
/// the two fields in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub document_id: String,
    pub statistics: TextStatistics,
    pub fingerprint: Fingerprint,
    pub is_duplicate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_document_id: Option<String>,
}

impl AnalysisResult {
    /// Result for a document that owns its fingerprint.
    pub fn original(
        document_id: impl Into<String>,
        statistics: TextStatistics,
        fingerprint: Fingerprint,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            statistics,
            fingerprint,
            is_duplicate: false,
            original_document_id: None,
        }
    }

    /// Result for a document whose fingerprint is owned by `owner`.
    pub fn duplicate_of(
        document_id: impl Into<String>,
        statistics: TextStatistics,
        fingerprint: Fingerprint,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            statistics,
            fingerprint,
            is_duplicate: true,
            original_document_id: Some(owner.into()),
        }
    }
}
