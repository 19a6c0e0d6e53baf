//! Evidence records and their chain-confirmation status.

use crate::actor::ActorId;
use crate::hash::ContentHash;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of an evidence record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceId(String);

impl EvidenceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EvidenceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Whether the record's anchoring transaction has been confirmed on chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockchainStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

impl BlockchainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockchainStatus::Pending => "pending",
            BlockchainStatus::Confirmed => "confirmed",
            BlockchainStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for BlockchainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A stored evidence record as returned by `GET /api/evidence`.
///
/// Records are immutable once created; there is no update or delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    pub id: EvidenceId,
    /// Digest as stored by the server. Only new submissions are validated;
    /// stored records may carry an empty or legacy value.
    #[serde(default)]
    pub hash: String,
    pub original_filename: String,
    pub case_id: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub timestamp: Timestamp,
    pub uploaded_by: ActorId,
    #[serde(default)]
    pub blockchain_status: BlockchainStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub file_size: u64,
    #[serde(default)]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Content-addressed storage reference (IPFS CID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_wallet: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EvidenceRecord {
    pub fn is_confirmed(&self) -> bool {
        self.blockchain_status == BlockchainStatus::Confirmed
    }

    /// The stored digest, if it is a well-formed SHA-256 hex string.
    pub fn content_hash(&self) -> Option<ContentHash> {
        ContentHash::parse(&self.hash).ok()
    }
}

/// Body of `POST /api/evidence`: the record without id, status or tx hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvidence {
    pub case_id: String,
    pub description: String,
    pub original_filename: String,
    pub hash: ContentHash,
    pub file_size: u64,
    pub mime_type: String,
    pub file_type: String,
    pub location: String,
    pub timestamp: Timestamp,
    pub uploaded_by: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_cid: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
