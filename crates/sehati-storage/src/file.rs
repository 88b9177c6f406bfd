use std::path::{Path, PathBuf};

use tracing::{debug, info};

use sehati_core::draft_keys::DraftKey;
use sehati_core::models::draft::AssessmentDraft;

use crate::error::StorageError;
use crate::state::{decode_draft, encode_draft};
use crate::DraftStore;

/// One `<key>.json` file per draft in a directory.
///
/// Writes go to a temp file that is then renamed over the target, so a
/// reader never sees a half-written draft.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the draft for `key`. Characters outside
    /// `[A-Za-z0-9_-]` in the storage key are replaced by `_`.
    pub fn path_for(&self, key: &DraftKey) -> PathBuf {
        let name: String = key
            .storage_key()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DraftStore for FileDraftStore {
    fn load_draft(&self, key: &DraftKey) -> Result<Option<AssessmentDraft>, StorageError> {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };
        decode_draft(key, &raw).map(Some)
    }

    fn save_draft(&self, key: &DraftKey, draft: &AssessmentDraft) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let path = self.path_for(key);
        let json = encode_draft(draft)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes()).map_err(io_error(&tmp_path))?;
        std::fs::rename(&tmp_path, &path).map_err(io_error(&path))?;

        debug!(path = %path.display(), step = draft.current_step, "draft saved");
        Ok(())
    }

    fn clear_draft(&self, key: &DraftKey) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "draft deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}
