use super::{open_writer, today};
use crate::calibration::Calibration;
use crate::core::SystemInstance;
use crate::io::{self, output::WindowRow, OutputFormat};
use crate::lifespan::compute_replacement_windows;
use crate::observability::{set_phase, ScoringPhase};
use crate::probability::failure_probability_from_window;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub input: PathBuf,
    pub now: Option<NaiveDate>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Windows for every system, in input order; failures stay per system.
pub fn window_rows(
    systems: &[SystemInstance],
    now: NaiveDate,
    calibration: &Calibration,
) -> Vec<WindowRow> {
    let _phase = set_phase(ScoringPhase::ReplacementWindows);
    systems
        .iter()
        .zip(compute_replacement_windows(systems, now, calibration))
        .map(|(system, outcome)| match outcome {
            Ok(window) => WindowRow {
                system_id: system.id.clone(),
                failure_probability_12mo: Some(failure_probability_from_window(
                    &window,
                    calibration,
                )),
                window: Some(window),
                error: None,
            },
            Err(e) => WindowRow {
                system_id: system.id.clone(),
                window: None,
                failure_probability_12mo: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

pub fn handle_window(config: WindowConfig, calibration: &Calibration) -> Result<()> {
    let systems = {
        let _phase = set_phase(ScoringPhase::LoadingInput);
        io::load_systems(&config.input)
            .with_context(|| format!("Failed to load systems from {}", config.input.display()))?
    };
    let now = config.now.unwrap_or_else(today);
    let rows = window_rows(&systems, now, calibration);

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    info!(
        systems = rows.len(),
        failed,
        as_of = %now,
        "Computed replacement windows"
    );

    let _phase = set_phase(ScoringPhase::Rendering);
    let mut writer = open_writer(config.format, config.output.as_deref())?;
    writer.write_windows(&rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SystemType;

    #[test]
    fn missing_install_date_fails_only_that_system() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let systems = vec![
            SystemInstance::new("hvac-1", SystemType::Hvac, NaiveDate::from_ymd_opt(2012, 6, 1)),
            SystemInstance::new("roof-1", SystemType::Roof, None),
        ];
        let rows = window_rows(&systems, now, Calibration::current());

        assert_eq!(rows[0].system_id, "hvac-1");
        assert!(rows[0].window.is_some());
        assert!(rows[0].failure_probability_12mo.unwrap() > 0.0);

        assert_eq!(rows[1].system_id, "roof-1");
        assert!(rows[1].window.is_none());
        assert!(rows[1].error.as_deref().unwrap().contains("roof-1"));
    }
}
