//! copycheck text analysis layer.
//!
//! Turns a document's text into [`TextStatistics`] and a content
//! [`Fingerprint`]. Everything here is a pure function of the input string:
//! no I/O, no clock, no locale. Nothing in this crate can fail.
//!
//! ## Invariants worth knowing
//!
//! - Same text, same statistics and fingerprint, on any machine.
//! - Fingerprint = lowercase hex SHA-256 of the UTF-8 bytes, except that empty
//!   text maps to the empty fingerprint.
//! - Word splitting is delimiter based; see [`WORD_DELIMITERS`].

mod fingerprint;
mod stats;

pub use crate::fingerprint::{compute_fingerprint, Fingerprint, FINGERPRINT_HEX_LEN};
pub use crate::stats::{compute_statistics, TextStatistics, WORD_DELIMITERS};

use serde::{Deserialize, Serialize};

/// Statistics and fingerprint computed from one pass over a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub statistics: TextStatistics,
    pub fingerprint: Fingerprint,
}

/// Run both [`compute_statistics`] and [`compute_fingerprint`] on `text`.
pub fn analyze(text: &str) -> TextAnalysis {
    TextAnalysis {
        statistics: compute_statistics(text),
        fingerprint: compute_fingerprint(text),
    }
}
