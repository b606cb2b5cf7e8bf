//! Multi-system replacement timeline.
//!
//! A pure coordinate transform over already-computed windows: each window
//! becomes a row with bar positions (percent of the display horizon), an
//! urgency tier and a data-quality flag. No risk is recomputed here.

use crate::core::SystemType;
use crate::lifespan::ReplacementWindow;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Bucket of years until likely replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementTier {
    /// Three years or less
    Urgent,
    /// More than three, at most six years
    Upcoming,
    /// More than six years
    Stable,
}

impl ReplacementTier {
    pub fn from_years(years_to_likely: f64) -> Self {
        if years_to_likely <= 3.0 {
            ReplacementTier::Urgent
        } else if years_to_likely <= 6.0 {
            ReplacementTier::Upcoming
        } else {
            ReplacementTier::Stable
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ReplacementTier::Urgent => "red",
            ReplacementTier::Upcoming => "amber",
            ReplacementTier::Stable => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReplacementTier::Urgent => "Replace soon",
            ReplacementTier::Upcoming => "Plan ahead",
            ReplacementTier::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    High,
    Medium,
    Low,
}

impl DataQuality {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.75 {
            DataQuality::High
        } else if confidence >= 0.5 {
            DataQuality::Medium
        } else {
            DataQuality::Low
        }
    }
}

/// Row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineOrder {
    /// Earliest likely replacement first, system id breaking ties
    #[default]
    Ascending,
    /// Listed system ids first in the given order, the rest ascending
    Explicit(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub system_id: String,
    pub system_type: SystemType,
    pub early_year: i32,
    pub likely_year: i32,
    pub late_year: i32,
    pub early_pct: f64,
    pub likely_pct: f64,
    pub late_pct: f64,
    pub years_to_likely: f64,
    pub tier: ReplacementTier,
    pub confidence: f64,
    pub data_quality: DataQuality,
    pub low_data_quality: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// `None` when there are no windows to anchor the axis
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub horizon_years: u32,
    pub rows: Vec<TimelineRow>,
}

/// Build a timeline anchored at the earliest `as_of` among the windows.
pub fn build_timeline(windows: &[ReplacementWindow], horizon_years: u32) -> Timeline {
    build_timeline_with(windows, horizon_years, None, &TimelineOrder::Ascending)
}

pub fn build_timeline_with(
    windows: &[ReplacementWindow],
    horizon_years: u32,
    start: Option<NaiveDate>,
    order: &TimelineOrder,
) -> Timeline {
    let horizon_years = horizon_years.max(1);
    let anchor = start.or_else(|| windows.iter().map(|w| w.provenance.as_of).min());

    let Some(anchor) = anchor else {
        return Timeline {
            start_year: None,
            end_year: None,
            horizon_years,
            rows: Vec::new(),
        };
    };

    let start_year = anchor.year();
    let mut ordered: Vec<&ReplacementWindow> = windows.iter().collect();
    sort_windows(&mut ordered, order);

    let rows = ordered
        .into_iter()
        .map(|window| row_for(window, start_year, horizon_years))
        .collect();

    Timeline {
        start_year: Some(start_year),
        end_year: Some(start_year + horizon_years as i32),
        horizon_years,
        rows,
    }
}

fn row_for(window: &ReplacementWindow, start_year: i32, horizon_years: u32) -> TimelineRow {
    let data_quality = DataQuality::from_confidence(window.confidence);
    TimelineRow {
        system_id: window.system_id.clone(),
        system_type: window.system_type.clone(),
        early_year: window.p10.year(),
        likely_year: window.p50.year(),
        late_year: window.p90.year(),
        early_pct: bar_position(window.p10, start_year, horizon_years),
        likely_pct: bar_position(window.p50, start_year, horizon_years),
        late_pct: bar_position(window.p90, start_year, horizon_years),
        years_to_likely: window.years_remaining,
        tier: ReplacementTier::from_years(window.years_remaining),
        confidence: window.confidence,
        data_quality,
        low_data_quality: data_quality == DataQuality::Low,
    }
}

/// Percent along the horizon, clamped to [0, 100].
pub fn bar_position(date: NaiveDate, start_year: i32, horizon_years: u32) -> f64 {
    let offset = fractional_year(date) - start_year as f64;
    (offset / horizon_years.max(1) as f64 * 100.0).clamp(0.0, 100.0)
}

fn fractional_year(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

fn ascending(a: &ReplacementWindow, b: &ReplacementWindow) -> Ordering {
    a.p50
        .cmp(&b.p50)
        .then_with(|| a.p10.cmp(&b.p10))
        .then_with(|| a.system_id.cmp(&b.system_id))
}

fn sort_windows(windows: &mut [&ReplacementWindow], order: &TimelineOrder) {
    match order {
        TimelineOrder::Ascending => windows.sort_by(|a, b| ascending(a, b)),
        TimelineOrder::Explicit(priority) => {
            let rank = |w: &ReplacementWindow| {
                priority
                    .iter()
                    .position(|id| *id == w.system_id)
                    .unwrap_or(usize::MAX)
            };
            windows.sort_by(|a, b| rank(*a).cmp(&rank(*b)).then_with(|| ascending(a, b)));
        }
    }
}
