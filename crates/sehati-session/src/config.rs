use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use sehati_core::draft_keys::{AnonymousTag, DraftKey};
use sehati_core::models::condition::Condition;
use sehati_risk::scoring::{BandScheme, EngineConfig};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SehatiConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Ceiling for the risk percentage, 1 to 100.
    pub score_cap: u8,
    /// Added in v1. Pre-versioned configs always banded at 30/60.
    pub band_scheme: BandScheme,
    /// Pause before the result is shown.
    pub analysis_delay_ms: u64,
    /// Where a file-backed draft store keeps its drafts. `None` keeps
    /// drafts in memory only.
    #[serde(default)]
    pub draft_dir: Option<PathBuf>,
    /// Scope drafts to an anonymous tag instead of one draft per condition.
    #[serde(default)]
    pub tag_drafts: bool,
}

impl Default for SehatiConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            config_version: CURRENT_VERSION,
            score_cap: engine.score_cap,
            band_scheme: engine.bands,
            analysis_delay_ms: 2000,
            draft_dir: None,
            tag_drafts: false,
        }
    }
}

impl SehatiConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            score_cap: self.score_cap,
            bands: self.band_scheme,
        }
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    /// Storage key for a condition's draft, honouring `tag_drafts`.
    pub fn draft_key(&self, condition: Condition, tag: &AnonymousTag) -> DraftKey {
        if self.tag_drafts {
            DraftKey::tagged(condition, tag.clone())
        } else {
            DraftKey::new(condition)
        }
    }
}

pub fn load_config(path: &Path) -> eyre::Result<SehatiConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SehatiConfig = serde_json::from_value(migrated)?;
    if !(1..=100).contains(&config.score_cap) {
        return Err(eyre::eyre!(
            "score_cap must be between 1 and 100, got {}",
            config.score_cap
        ));
    }
    Ok(config)
}

/// Load the config at `path`, or the defaults when no file exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<SehatiConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(SehatiConfig::default())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: add band_scheme
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("band_scheme")
            .or_insert(serde_json::Value::String("three_tier".to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added band_scheme)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &SehatiConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
