//! sehati-storage
//!
//! Draft persistence behind the [`DraftStore`] repository trait. Drafts are
//! stored as JSON strings under the keys defined in
//! [`sehati_core::draft_keys`].

pub mod error;
pub mod file;
pub mod memory;
pub mod state;

use std::sync::Arc;

use sehati_core::draft_keys::DraftKey;
use sehati_core::models::draft::AssessmentDraft;

use error::StorageError;

/// Key/value repository for in-progress assessments.
pub trait DraftStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn load_draft(&self, key: &DraftKey) -> Result<Option<AssessmentDraft>, StorageError>;

    /// Replace whatever is stored under `key`.
    fn save_draft(&self, key: &DraftKey, draft: &AssessmentDraft) -> Result<(), StorageError>;

    /// Remove the draft. Clearing a missing key is not an error.
    fn clear_draft(&self, key: &DraftKey) -> Result<(), StorageError>;
}

impl<T: DraftStore + ?Sized> DraftStore for Arc<T> {
    fn load_draft(&self, key: &DraftKey) -> Result<Option<AssessmentDraft>, StorageError> {
        (**self).load_draft(key)
    }

    fn save_draft(&self, key: &DraftKey, draft: &AssessmentDraft) -> Result<(), StorageError> {
        (**self).save_draft(key, draft)
    }

    fn clear_draft(&self, key: &DraftKey) -> Result<(), StorageError> {
        (**self).clear_draft(key)
    }
}

impl<T: DraftStore + ?Sized> DraftStore for &T {
    fn load_draft(&self, key: &DraftKey) -> Result<Option<AssessmentDraft>, StorageError> {
        (**self).load_draft(key)
    }

    fn save_draft(&self, key: &DraftKey, draft: &AssessmentDraft) -> Result<(), StorageError> {
        (**self).save_draft(key, draft)
    }

    fn clear_draft(&self, key: &DraftKey) -> Result<(), StorageError> {
        (**self).clear_draft(key)
    }
}
