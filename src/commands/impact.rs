use super::open_writer;
use crate::core::SystemType;
use crate::impact::{ImpactEstimator, StaticImpactTable};
use crate::io::{output::ImpactReport, OutputFormat};
use crate::observability::{set_phase, ScoringPhase};
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct ImpactConfig {
    pub system_type: String,
    pub category: Option<String>,
    pub format: OutputFormat,
}

pub fn impact_report(
    estimator: &dyn ImpactEstimator,
    system_type: SystemType,
    category: Option<String>,
) -> ImpactReport {
    let _phase = set_phase(ScoringPhase::ImpactEstimate);
    let estimate = estimator.estimate(&system_type, category.as_deref());
    ImpactReport {
        system_type,
        category,
        estimator: estimator.name().to_string(),
        estimate,
    }
}

pub fn handle_impact(config: ImpactConfig) -> Result<()> {
    let report = impact_report(
        &StaticImpactTable,
        SystemType::from(config.system_type.as_str()),
        config.category,
    );
    let mut writer = open_writer(config.format, None)?;
    writer.write_impact(&report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::ImpactSource;

    #[test]
    fn report_names_its_estimator() {
        let report = impact_report(
            &StaticImpactTable,
            SystemType::from("water-heater"),
            Some("flush".into()),
        );
        assert_eq!(report.system_type, SystemType::WaterHeater);
        assert_eq!(report.estimator, "static-table");
        assert_eq!(report.estimate.source, ImpactSource::CategoryDefault);
    }
}
