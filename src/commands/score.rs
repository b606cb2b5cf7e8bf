use super::open_writer;
use crate::calibration::Calibration;
use crate::core::Dollars;
use crate::intervention::{InterventionSnapshot, ScoringRequest};
use crate::io::{self, output::ScoredRequest, OutputFormat};
use crate::observability::{set_phase, ScoringPhase};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub input: PathBuf,
    pub threshold: Option<f64>,
    pub capture: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Score each request; `default_threshold` applies where a request has none.
pub fn score_requests(
    requests: &[ScoringRequest],
    default_threshold: Dollars,
    capture: bool,
    calibration: &Calibration,
) -> Vec<ScoredRequest> {
    let _phase = set_phase(ScoringPhase::InterventionScoring);
    requests
        .iter()
        .map(|request| {
            let result = request.evaluate(default_threshold, calibration);
            let snapshot = (capture && result.eligible).then(|| {
                let id = request
                    .system_id
                    .clone()
                    .unwrap_or_else(|| request.system_type.to_string());
                InterventionSnapshot::capture(id, &result, request.as_of)
            });
            ScoredRequest {
                system_id: request.system_id.clone(),
                result,
                snapshot,
            }
        })
        .collect()
}

pub fn handle_score(
    config: ScoreConfig,
    configured_threshold: Dollars,
    calibration: &Calibration,
) -> Result<()> {
    let requests = {
        let _phase = set_phase(ScoringPhase::LoadingInput);
        io::load_scoring_requests(&config.input).with_context(|| {
            format!("Failed to load scoring requests from {}", config.input.display())
        })?
    };
    let default_threshold = config
        .threshold
        .map(Dollars::new)
        .unwrap_or(configured_threshold);

    let scored = score_requests(&requests, default_threshold, config.capture, calibration);
    info!(
        requests = scored.len(),
        eligible = scored.iter().filter(|s| s.result.eligible).count(),
        "Scored intervention requests"
    );

    let _phase = set_phase(ScoringPhase::Rendering);
    let mut writer = open_writer(config.format, config.output.as_deref())?;
    writer.write_scores(&scored)?;
    Ok(())
}
