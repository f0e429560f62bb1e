//! Persisted edit-snapshot record.
//!
//! A compact subset of page state cached in session storage so a later
//! request can reconstruct an editing context without replaying the full
//! page script. The record is addressed by a content digest keyed with a
//! per-session secret; a digest mismatch on restore means the record was
//! tampered with or the secret rotated (logout/login elsewhere).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PageError, PageResult};

/// Snapshot of the fields needed to rebuild an editing context.
///
/// Only non-default values are recorded; `module_id` takes precedence over
/// `course_id` when both could apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSnapshot {
    /// Security scope id the page ran under.
    pub scope_id: i64,
    /// Canonicalized page address (fragment stripped).
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_page: Option<String>,
    /// Caller-added editing capabilities beyond the base one.
    #[serde(default)]
    pub extra_capabilities: Vec<String>,
    #[serde(default)]
    pub force_lock_all_blocks: bool,
    #[serde(default = "now_ms")]
    pub created_at: i64,
}

impl EditSnapshot {
    /// A snapshot anchored at a scope and address with everything else at
    /// defaults.
    pub fn new(scope_id: i64, url: impl Into<String>) -> Self {
        Self {
            scope_id,
            url: url.into(),
            module_id: None,
            course_id: None,
            page_layout: None,
            page_type: None,
            sub_page: None,
            extra_capabilities: Vec::new(),
            force_lock_all_blocks: false,
            created_at: now_ms(),
        }
    }

    /// Content digest over the serialized record plus the session secret,
    /// used as the storage key. Hex-encoded SHA-256.
    pub fn digest(&self, secret: &str) -> PageResult<String> {
        let body = serde_json::to_vec(self)
            .map_err(|e| PageError::internal(format!("snapshot serialization failed: {e}")))?;
        let mut hasher = Sha256::new();
        hasher.update(&body);
        hasher.update(secret.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
