use sehati_core::draft_keys::DraftKey;
use sehati_core::models::draft::AssessmentDraft;

use crate::error::StorageError;

/// Serialize a draft to the JSON string kept in the store.
pub fn encode_draft(draft: &AssessmentDraft) -> Result<String, StorageError> {
    Ok(serde_json::to_string(draft)?)
}

/// Parse a stored draft and check it belongs to the condition its key names.
pub fn decode_draft(key: &DraftKey, raw: &str) -> Result<AssessmentDraft, StorageError> {
    let draft: AssessmentDraft = serde_json::from_str(raw)?;
    if draft.condition != key.condition {
        return Err(StorageError::ConditionMismatch {
            key: key.storage_key(),
            found: draft.condition,
        });
    }
    Ok(draft)
}
