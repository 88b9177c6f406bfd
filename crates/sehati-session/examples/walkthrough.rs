//! Runs one scripted assessment per condition and prints the reports.
//!
//! `SEHATI_CONFIG` may point at a config file; `RUST_LOG=debug` shows the
//! session events and scoring detail.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use sehati_core::draft_keys::AnonymousTag;
use sehati_core::models::condition::Condition;
use sehati_core::models::draft::StepValues;
use sehati_risk::{profile_for, ConditionProfile};
use sehati_session::config::load_or_default;
use sehati_session::{Advance, AssessmentSession, LocalAnalyzer};
use sehati_storage::file::FileDraftStore;
use sehati_storage::memory::MemoryDraftStore;
use sehati_storage::DraftStore;
use tracing_subscriber::EnvFilter;

fn answers(condition: Condition) -> Vec<StepValues> {
    let step = |pairs: &[(&str, &str)]| -> StepValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    let basic = step(&[("age", "52"), ("gender", "female"), ("height", "162"), ("weight", "74")]);

    match condition {
        Condition::Diabetes => vec![
            basic,
            step(&[("fastingGlucose", "108"), ("hba1c", "unknown")]),
            step(&[("exercise", "rarely"), ("diet", "average"), ("smoking", "no")]),
            step(&[("familyHistory", "first_degree")]),
        ],
        Condition::Hypertension => vec![
            basic,
            step(&[("bpReading1", "138/88"), ("bpReading2", "142/90"), ("bpReading3", "136/86")]),
            step(&[
                ("exercise", "weekly"),
                ("diet", "average"),
                ("smoking", "no"),
                ("salt", "high"),
                ("stress", "moderate"),
                ("alcohol", "none"),
            ]),
            step(&[("familyHistory", "distant")]),
        ],
        Condition::Heart => vec![
            basic,
            step(&[
                ("cholesterolTotal", "215"),
                ("ldl", "unknown"),
                ("hdl", "48"),
                ("triglycerides", "160"),
            ]),
            step(&[("exercise", "weekly"), ("diet", "healthy"), ("smoking", "former")]),
            step(&[
                ("familyHistory", "none"),
                ("chestPain", "never"),
                ("bloodPressure", "borderline"),
                ("diabetesStatus", "none"),
            ]),
        ],
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match env::var("SEHATI_CONFIG") {
        Ok(path) => load_or_default(&PathBuf::from(path))?,
        Err(_) => Default::default(),
    };

    let store: Arc<dyn DraftStore> = match &config.draft_dir {
        Some(dir) => Arc::new(FileDraftStore::new(dir)),
        None => Arc::new(MemoryDraftStore::new()),
    };
    let analyzer = LocalAnalyzer::from_config(&config);
    let tag = AnonymousTag::generate();

    for condition in Condition::ALL {
        let profile = profile_for(condition);
        let key = config.draft_key(condition, &tag);
        let mut session = AssessmentSession::open(profile, store.clone(), analyzer, key);

        for values in answers(condition) {
            if let Advance::Completed(result) = session.advance(values).await? {
                let report = session.profile().summarize(&session.draft().fields, &result);
                println!("{report}");
            }
        }

        session.acknowledge();
    }

    Ok(())
}
