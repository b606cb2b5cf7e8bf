// Export modules for library usage
pub mod calibration;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod impact;
pub mod intervention;
pub mod io;
pub mod lifespan;
pub mod observability;
pub mod probability;
pub mod timeline;

// Re-export commonly used types
pub use crate::core::{
    Dollars, Error, Result, ResultExt, SystemInstance, SystemType, UnitIndex,
};

pub use crate::calibration::Calibration;

pub use crate::lifespan::{
    compute_replacement_window, compute_replacement_window_with, compute_replacement_windows,
    ReplacementWindow, WindowProvenance,
};

pub use crate::probability::{
    failure_probability_12mo, failure_probability_from_window, probability_from_risk_outlook,
    FailureProbabilityInput,
};

pub use crate::intervention::{
    intervention_eligibility, intervention_eligibility_with, intervention_score, urgency_premium,
    CostEstimates, EligibilityResult, InterventionScore, InterventionSnapshot, RiskContext,
    ScoringRequest, UrgencyFactors, UrgencyFlags,
};

pub use crate::impact::{estimated_impact, ImpactEstimate, ImpactEstimator, StaticImpactTable};

pub use crate::timeline::{build_timeline, build_timeline_with, ReplacementTier, Timeline};

pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
