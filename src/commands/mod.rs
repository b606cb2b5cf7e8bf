//! CLI command implementations.
//!
//! - **window**: replacement windows and 12-month failure probability per system
//! - **score**: intervention score and alert eligibility per request
//! - **timeline**: multi-system replacement timeline
//! - **impact**: estimated impact of a maintenance action
//! - **init**: write a default `.homerisk.toml`

pub mod impact;
pub mod init;
pub mod score;
pub mod timeline;
pub mod window;

pub use impact::{handle_impact, ImpactConfig};
pub use init::init_config;
pub use score::{handle_score, score_requests, ScoreConfig};
pub use timeline::{handle_timeline, TimelineCommandConfig};
pub use window::{handle_window, window_rows, WindowConfig};

use crate::io::{create_writer, OutputFormat, ReportWriter};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Writer for `format`, to `output` or stdout.
pub(crate) fn open_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Box<dyn ReportWriter>> {
    let sink: Box<dyn std::io::Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    Ok(create_writer(format, sink))
}
