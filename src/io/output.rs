use crate::core::SystemType;
use crate::impact::ImpactEstimate;
use crate::intervention::{EligibilityResult, InterventionSnapshot};
use crate::lifespan::ReplacementWindow;
use crate::timeline::{ReplacementTier, Timeline, TimelineRow};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use anyhow::Context;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Terminal,
}

/// One system's outcome in a `window` run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRow {
    pub system_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<ReplacementWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_probability_12mo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One request's outcome in a `score` run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    pub result: EligibilityResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<InterventionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    pub system_type: SystemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub estimator: String,
    pub estimate: ImpactEstimate,
}

pub trait ReportWriter {
    fn write_windows(&mut self, rows: &[WindowRow]) -> anyhow::Result<()>;
    fn write_scores(&mut self, scored: &[ScoredRequest]) -> anyhow::Result<()>;
    fn write_timeline(&mut self, timeline: &Timeline) -> anyhow::Result<()>;
    fn write_impact(&mut self, report: &ImpactReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Buffered sinks only surface write errors here.
fn flush<W: Write>(writer: &mut W) -> anyhow::Result<()> {
    writer.flush().context("Failed to flush report output")
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        flush(&mut self.writer)
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_windows(&mut self, rows: &[WindowRow]) -> anyhow::Result<()> {
        self.write_value(rows)
    }

    fn write_scores(&mut self, scored: &[ScoredRequest]) -> anyhow::Result<()> {
        self.write_value(scored)
    }

    fn write_timeline(&mut self, timeline: &Timeline) -> anyhow::Result<()> {
        self.write_value(timeline)
    }

    fn write_impact(&mut self, report: &ImpactReport) -> anyhow::Result<()> {
        self.write_value(report)
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

const BAR_WIDTH: usize = 40;

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn tier_color(tier: ReplacementTier) -> Color {
    match tier {
        ReplacementTier::Urgent => Color::Red,
        ReplacementTier::Upcoming => Color::Yellow,
        ReplacementTier::Stable => Color::Green,
    }
}

fn colored_tier(tier: ReplacementTier) -> ColoredString {
    match tier {
        ReplacementTier::Urgent => tier.label().red().bold(),
        ReplacementTier::Upcoming => tier.label().yellow(),
        ReplacementTier::Stable => tier.label().green(),
    }
}

/// Text bar: `-` spans early..late, `|` marks likely.
pub(crate) fn render_bar(row: &TimelineRow, width: usize) -> String {
    let col = |pct: f64| ((pct / 100.0) * (width.saturating_sub(1)) as f64).round() as usize;
    let (early, likely, late) = (col(row.early_pct), col(row.likely_pct), col(row.late_pct));
    (0..width)
        .map(|i| {
            if i == likely {
                '|'
            } else if (early..=late).contains(&i) {
                '-'
            } else {
                ' '
            }
        })
        .collect()
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_windows(&mut self, rows: &[WindowRow]) -> anyhow::Result<()> {
        let mut table = new_table(vec![
            "System", "Type", "Early", "Likely", "Late", "Years left", "12-mo risk", "Confidence",
        ]);
        for row in rows {
            match &row.window {
                Some(w) => {
                    let tier = ReplacementTier::from_years(w.years_remaining);
                    table.add_row(vec![
                        Cell::new(&row.system_id),
                        Cell::new(w.system_type.display_name()),
                        Cell::new(w.p10),
                        Cell::new(w.p50),
                        Cell::new(w.p90),
                        Cell::new(format!("{:.1}", w.years_remaining)).fg(tier_color(tier)),
                        Cell::new(format!(
                            "{:.1}%",
                            row.failure_probability_12mo.unwrap_or(0.0) * 100.0
                        )),
                        Cell::new(format!("{:.2}", w.confidence)),
                    ]);
                }
                None => {
                    table.add_row(vec![
                        Cell::new(&row.system_id),
                        Cell::new(row.error.as_deref().unwrap_or("no window")).fg(Color::Red),
                    ]);
                }
            }
        }
        writeln!(self.writer, "{table}")?;
        flush(&mut self.writer)
    }

    fn write_scores(&mut self, scored: &[ScoredRequest]) -> anyhow::Result<()> {
        let mut table = new_table(vec![
            "System", "Type", "P(fail 12mo)", "Base risk", "Premium", "Score", "Threshold", "Alert",
        ]);
        for item in scored {
            let r = &item.result;
            let alert = if r.eligible {
                Cell::new("yes").fg(Color::Red)
            } else {
                Cell::new("no").fg(Color::Green)
            };
            table.add_row(vec![
                Cell::new(item.system_id.as_deref().unwrap_or("-")),
                Cell::new(r.system_type.display_name()),
                Cell::new(format!("{:.3}", r.failure_probability_12mo)),
                Cell::new(format!("${:.2}", r.breakdown.base_risk)),
                Cell::new(format!("${:.2}", r.breakdown.urgency_premium)),
                Cell::new(format!("${:.2}", r.score)),
                Cell::new(format!("${:.2}", r.threshold)),
                alert,
            ]);
        }
        writeln!(self.writer, "{table}")?;

        for item in scored {
            let fired = item.result.urgency_factors.fired();
            if !fired.is_empty() {
                writeln!(
                    self.writer,
                    "{}: urgency factors {}",
                    item.system_id.as_deref().unwrap_or(item.result.system_type.as_str()),
                    fired.join(", ").yellow()
                )?;
            }
        }
        flush(&mut self.writer)
    }

    fn write_timeline(&mut self, timeline: &Timeline) -> anyhow::Result<()> {
        let (Some(start), Some(end)) = (timeline.start_year, timeline.end_year) else {
            writeln!(self.writer, "No systems to show")?;
            return flush(&mut self.writer);
        };

        writeln!(
            self.writer,
            "{}",
            format!("Replacement timeline {start}-{end}").bold()
        )?;
        let mut table = new_table(vec!["System", "Window", "Likely", "Status", "Data"]);
        for row in &timeline.rows {
            let data = if row.low_data_quality {
                Cell::new("low").fg(Color::Yellow)
            } else {
                Cell::new(format!("{:?}", row.data_quality).to_lowercase())
            };
            table.add_row(vec![
                Cell::new(format!("{} ({})", row.system_id, row.system_type.display_name())),
                Cell::new(render_bar(row, BAR_WIDTH)).fg(tier_color(row.tier)),
                Cell::new(format!(
                    "{} ({}-{})",
                    row.likely_year, row.early_year, row.late_year
                )),
                Cell::new(colored_tier(row.tier).to_string()),
                data,
            ]);
        }
        writeln!(self.writer, "{table}")?;
        flush(&mut self.writer)
    }

    fn write_impact(&mut self, report: &ImpactReport) -> anyhow::Result<()> {
        let fmt = |v: Option<f64>, unit: &str| match v {
            Some(v) => format!("{v}{unit}"),
            None => "unknown".to_string(),
        };
        let mut table = new_table(vec!["Estimate", "Value"]);
        table.add_row(vec![
            "System".to_string(),
            report.system_type.display_name().to_string(),
        ]);
        if let Some(category) = &report.category {
            table.add_row(vec!["Category".to_string(), category.clone()]);
        }
        table.add_row(vec![
            "Score change".to_string(),
            fmt(report.estimate.score_change, " pts"),
        ]);
        table.add_row(vec![
            "Lifespan added".to_string(),
            fmt(report.estimate.months_added, " months"),
        ]);
        table.add_row(vec![
            "Failure risk reduction".to_string(),
            fmt(
                report.estimate.failure_prob_reduction.map(|p| p * 100.0),
                " pts",
            ),
        ]);
        table.add_row(vec![
            "Source".to_string(),
            format!("{:?} ({})", report.estimate.source, report.estimator),
        ]);
        writeln!(self.writer, "{table}")?;
        flush(&mut self.writer)
    }
}
