use super::{open_writer, today};
use crate::calibration::Calibration;
use crate::io::{self, OutputFormat};
use crate::lifespan::compute_replacement_windows;
use crate::observability::{set_phase, ScoringPhase};
use crate::timeline::{build_timeline_with, TimelineOrder};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct TimelineCommandConfig {
    pub input: PathBuf,
    pub horizon: Option<u32>,
    pub now: Option<NaiveDate>,
    pub order: Option<Vec<String>>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_timeline(
    config: TimelineCommandConfig,
    configured_horizon: u32,
    calibration: &Calibration,
) -> Result<()> {
    let systems = {
        let _phase = set_phase(ScoringPhase::LoadingInput);
        io::load_systems(&config.input)
            .with_context(|| format!("Failed to load systems from {}", config.input.display()))?
    };
    let now = config.now.unwrap_or_else(today);

    let windows: Vec<_> = {
        let _phase = set_phase(ScoringPhase::ReplacementWindows);
        compute_replacement_windows(&systems, now, calibration)
            .into_iter()
            .filter_map(|outcome| match outcome {
                Ok(window) => Some(window),
                Err(e) => {
                    warn!("Skipping system on timeline: {}", e);
                    None
                }
            })
            .collect()
    };

    let order = config
        .order
        .map(TimelineOrder::Explicit)
        .unwrap_or_default();
    let horizon = config.horizon.unwrap_or(configured_horizon);

    let timeline = {
        let _phase = set_phase(ScoringPhase::Timeline);
        build_timeline_with(&windows, horizon, Some(now), &order)
    };
    info!(
        rows = timeline.rows.len(),
        skipped = systems.len() - timeline.rows.len(),
        horizon = timeline.horizon_years,
        "Built replacement timeline"
    );

    let _phase = set_phase(ScoringPhase::Rendering);
    let mut writer = open_writer(config.format, config.output.as_deref())?;
    writer.write_timeline(&timeline)?;
    Ok(())
}
