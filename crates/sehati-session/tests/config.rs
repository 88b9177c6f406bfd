use std::time::Duration;

use sehati_core::draft_keys::{AnonymousTag, DraftKey};
use sehati_core::models::condition::Condition;
use sehati_risk::scoring::BandScheme;
use sehati_session::config::{load_config, load_or_default, save_config};
use sehati_session::events::{SessionAction, SessionEvent};
use sehati_session::{LocalAnalyzer, SehatiConfig};

#[test]
fn defaults_match_engine_defaults() {
    let config = SehatiConfig::default();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.score_cap, 100);
    assert_eq!(config.band_scheme, BandScheme::ThreeTier);
    assert_eq!(config.analysis_delay(), Duration::from_millis(2000));
    assert_eq!(LocalAnalyzer::default().delay, Duration::from_secs(2));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(&dir.path().join("sehati.json")).unwrap();
    assert_eq!(config, SehatiConfig::default());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("sehati.json");
    let config = SehatiConfig {
        score_cap: 95,
        band_scheme: BandScheme::FourTier,
        analysis_delay_ms: 0,
        draft_dir: Some(dir.path().join("drafts")),
        tag_drafts: true,
        ..SehatiConfig::default()
    };

    save_config(&path, &config).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.engine_config().score_cap, 95);
    assert_eq!(loaded.engine_config().bands, BandScheme::FourTier);
}

#[test]
fn pre_versioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sehati.json");
    std::fs::write(&path, r#"{"score_cap": 95, "analysis_delay_ms": 1500}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.band_scheme, BandScheme::ThreeTier);
    assert_eq!(config.score_cap, 95);
    assert_eq!(config.draft_dir, None);
    assert!(!config.tag_drafts);
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sehati.json");
    std::fs::write(
        &path,
        r#"{"config_version": 7, "score_cap": 100, "band_scheme": "three_tier", "analysis_delay_ms": 0}"#,
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn zero_cap_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sehati.json");
    std::fs::write(
        &path,
        r#"{"config_version": 1, "score_cap": 0, "band_scheme": "four_tier", "analysis_delay_ms": 0}"#,
    )
    .unwrap();

    assert!(load_config(&path).is_err());
}

#[test]
fn draft_key_follows_tagging_setting() {
    let tag = AnonymousTag::generate();
    let untagged = SehatiConfig::default();
    assert_eq!(untagged.draft_key(Condition::Heart, &tag), DraftKey::new(Condition::Heart));

    let tagged = SehatiConfig {
        tag_drafts: true,
        ..SehatiConfig::default()
    };
    let key = tagged.draft_key(Condition::Heart, &tag);
    assert_eq!(key.tag.as_ref(), Some(&tag));
}

#[test]
fn session_events_serialize_without_answers() {
    let key = DraftKey::new(Condition::Diabetes);
    let event = SessionEvent::new(SessionAction::StepAdvanced, &key, 2)
        .with_details(serde_json::json!({ "fields": ["age"] }));

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "step_advanced");
    assert_eq!(json["condition"], "diabetes");
    assert_eq!(json["draft_key"], "sehati:assessment:draft:diabetes");
    assert_eq!(json["step"], 2);
    event.emit();
}
