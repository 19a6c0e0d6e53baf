//! Raw user input for the two create operations, and its validation.
//!
//! Fields are optional here because they arrive from forms or CLI flags where
//! anything may be left out. A blank string counts as missing.

use crate::error::LifecycleError;
use custody_types::{
    ActorId, ContentHash, EvidenceId, NewAccessRequest, NewEvidence, RequestType, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Input for submitting an evidence record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceSubmission {
    pub case_id: Option<String>,
    pub description: Option<String>,
    pub original_filename: Option<String>,
    /// Hex SHA-256 digest of the file contents.
    pub hash: Option<String>,
    pub file_size: Option<u64>,
    pub mime_type: Option<String>,
    pub location: Option<String>,
    /// Content-addressed storage reference, if the file was uploaded.
    pub ipfs_cid: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
}

impl EvidenceSubmission {
    /// Check required fields and build the API body.
    ///
    /// Every missing field is reported in one error.
    pub fn validate(
        self,
        uploaded_by: &ActorId,
        now: Timestamp,
    ) -> Result<NewEvidence, LifecycleError> {
        let case_id = present(self.case_id);
        let description = present(self.description);
        let original_filename = present(self.original_filename);
        let hash = present(self.hash);
        let mime_type = present(self.mime_type);

        let missing: Vec<&str> = [
            ("caseId", case_id.is_none()),
            ("description", description.is_none()),
            ("originalFilename", original_filename.is_none()),
            ("hash", hash.is_none()),
            ("fileSize", self.file_size.is_none()),
            ("mimeType", mime_type.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (
            Some(case_id),
            Some(description),
            Some(original_filename),
            Some(hash),
            Some(file_size),
            Some(mime_type),
        ) = (
            case_id,
            description,
            original_filename,
            hash,
            self.file_size,
            mime_type,
        )
        else {
            return Err(LifecycleError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        };

        let hash =
            ContentHash::parse(&hash).map_err(|e| LifecycleError::Validation(e.to_string()))?;

        Ok(NewEvidence {
            case_id,
            description,
            original_filename,
            hash,
            file_size,
            file_type: mime_type.clone(),
            mime_type,
            location: present(self.location).unwrap_or_default(),
            timestamp: now,
            uploaded_by: uploaded_by.clone(),
            ipfs_cid: present(self.ipfs_cid),
            tags: self.tags.as_deref().map(parse_tags).unwrap_or_default(),
        })
    }
}

/// Input for requesting access to evidence or to a whole case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestForm {
    pub evidence_id: Option<EvidenceId>,
    pub case_id: Option<String>,
    pub reason: Option<String>,
    pub justification: Option<String>,
    pub request_type: Option<RequestType>,
}

impl AccessRequestForm {
    /// Check required fields and build the API body.
    pub fn validate(self, requested_by: &ActorId) -> Result<NewAccessRequest, LifecycleError> {
        let evidence_id = self.evidence_id.filter(|id| !id.as_str().trim().is_empty());
        let case_id = present(self.case_id);
        if evidence_id.is_none() && case_id.is_none() {
            return Err(LifecycleError::Validation(
                "either evidenceId or caseId is required".into(),
            ));
        }
        let reason = present(self.reason)
            .ok_or_else(|| LifecycleError::Validation("reason is required".into()))?;
        let request_type = self
            .request_type
            .ok_or_else(|| LifecycleError::Validation("requestType is required".into()))?;

        Ok(NewAccessRequest {
            evidence_id,
            case_id,
            requested_by: requested_by.clone(),
            reason,
            justification: present(self.justification),
            request_type,
        })
    }
}

/// Split a comma-separated tag list, trimming entries and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
