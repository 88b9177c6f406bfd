use std::future::Future;
use std::time::Duration;

use tracing::debug;

use sehati_core::models::input::RiskInput;
use sehati_core::models::result::RiskResult;
use sehati_risk::engine::RiskEngine;
use sehati_risk::scoring::EngineConfig;
use sehati_risk::ConditionProfile;

use crate::config::SehatiConfig;

/// Turns a validated input into a result. The session awaits this between
/// `Computing` and `Complete`, so a remote scorer can replace the local one
/// without touching the state machine.
pub trait Analyzer: Send + Sync {
    fn analyze<P: ConditionProfile + ?Sized>(
        &self,
        profile: &P,
        input: &RiskInput,
    ) -> impl Future<Output = RiskResult> + Send;
}

/// Scores in-process after a fixed pause used for pacing the results screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAnalyzer {
    pub config: EngineConfig,
    pub delay: Duration,
}

impl LocalAnalyzer {
    pub fn new(config: EngineConfig, delay: Duration) -> Self {
        Self { config, delay }
    }

    /// No pause; used by tests and batch scoring.
    pub fn immediate(config: EngineConfig) -> Self {
        Self::new(config, Duration::ZERO)
    }

    pub fn from_config(config: &SehatiConfig) -> Self {
        Self::new(config.engine_config(), config.analysis_delay())
    }
}

impl Default for LocalAnalyzer {
    fn default() -> Self {
        Self::from_config(&SehatiConfig::default())
    }
}

impl Analyzer for LocalAnalyzer {
    async fn analyze<P: ConditionProfile + ?Sized>(&self, profile: &P, input: &RiskInput) -> RiskResult {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "pausing before result");
            tokio::time::sleep(self.delay).await;
        }
        RiskEngine::new(profile, self.config).assess(input)
    }
}
