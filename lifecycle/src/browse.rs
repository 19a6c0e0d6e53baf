//! Evidence search and case filtering.

use custody_types::EvidenceRecord;
use serde::{Deserialize, Serialize};

/// Filter over evidence records.
///
/// `search` matches case-insensitively against filename, description or case
/// id. `case_id` must match exactly. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceQuery {
    pub search: Option<String>,
    pub case_id: Option<String>,
}

impl EvidenceQuery {
    pub fn matches(&self, record: &EvidenceRecord) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    &record.original_filename,
                    &record.description,
                    &record.case_id,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
        };
        let matches_case = match self.case_id.as_deref() {
            None | Some("") => true,
            Some(case_id) => record.case_id == case_id,
        };
        matches_search && matches_case
    }

    /// Matching records, in input order.
    pub fn filter<'a>(&self, evidence: &'a [EvidenceRecord]) -> Vec<&'a EvidenceRecord> {
        evidence.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct case ids in first-seen order.
pub fn unique_case_ids(evidence: &[EvidenceRecord]) -> Vec<&str> {
    let mut seen = Vec::new();
    for record in evidence {
        if !seen.contains(&record.case_id.as_str()) {
            seen.push(record.case_id.as_str());
        }
    }
    seen
}
