use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use sehati_core::draft_keys::DraftKey;
use sehati_core::models::draft::AssessmentDraft;

use crate::error::StorageError;
use crate::state::{decode_draft, encode_draft};
use crate::DraftStore;

/// In-process string store with the semantics of browser `localStorage`:
/// values are JSON strings, and an optional quota bounds the total size of
/// all keys and values.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes pushing its total size past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(bytes),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw stored string, as a page script would see it.
    pub fn raw(&self, key: &DraftKey) -> Option<String> {
        self.entries().get(&key.storage_key()).cloned()
    }

    /// Store a raw string without encoding it, e.g. to plant a corrupt entry.
    pub fn put_raw(&self, key: &DraftKey, value: impl Into<String>) {
        self.entries().insert(key.storage_key(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Total bytes of all keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries().iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load_draft(&self, key: &DraftKey) -> Result<Option<AssessmentDraft>, StorageError> {
        let Some(raw) = self.raw(key) else {
            return Ok(None);
        };
        decode_draft(key, &raw).map(Some)
    }

    fn save_draft(&self, key: &DraftKey, draft: &AssessmentDraft) -> Result<(), StorageError> {
        let storage_key = key.storage_key();
        let value = encode_draft(draft)?;
        let mut entries = self.entries();

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| **k != storage_key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + storage_key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: storage_key,
                    needed,
                    quota,
                });
            }
        }

        debug!(key = %storage_key, bytes = value.len(), "draft stored in memory");
        entries.insert(storage_key, value);
        Ok(())
    }

    fn clear_draft(&self, key: &DraftKey) -> Result<(), StorageError> {
        self.entries().remove(&key.storage_key());
        Ok(())
    }
}
