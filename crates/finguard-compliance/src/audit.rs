//! Audit records for compliance classifications.
//! The raw query is never stored: only its SHA-256 digest and length.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::classification::{ClassificationResult, ComplianceCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAuditEntry {
    pub id: Uuid,
    pub session_id: Option<String>,
    pub category: ComplianceCategory,
    pub triggered: bool,
    pub matched_pattern: Option<String>,
    pub input_sha256: String,
    pub input_chars: usize,
    pub enforced: bool,
    pub classified_at: chrono::DateTime<Utc>,
}

impl ComplianceAuditEntry {
    pub fn new(
        session_id: Option<String>,
        input: &str,
        result: &ClassificationResult,
        enforced: bool,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        let input_sha256 = format!("{:x}", hasher.finalize());

        Self {
            id: Uuid::new_v4(),
            session_id,
            category: result.category,
            triggered: result.triggered,
            matched_pattern: result.matched_pattern.clone(),
            input_sha256,
            input_chars: input.chars().count(),
            enforced,
            classified_at: Utc::now(),
        }
    }
}
