//! File input and report output for the binary.

pub mod output;

pub use output::{create_writer, JsonWriter, OutputFormat, ReportWriter, TerminalWriter};

use crate::core::{Error, Result, SystemInstance};
use crate::intervention::ScoringRequest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// `{ "systems": [...] }` input for `window` and `timeline`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemsFile {
    pub systems: Vec<SystemInstance>,
}

/// A score input file holds one request or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RequestsFile {
    Many(Vec<ScoringRequest>),
    One(Box<ScoringRequest>),
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::file_system(format!("Failed to read {}: {}", path.display(), e), path)
    })
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        Error::file_system(format!("Failed to write {}: {}", path.display(), e), path)
    })
}

pub fn parse_systems(json: &str) -> Result<Vec<SystemInstance>> {
    let file: SystemsFile = serde_json::from_str(json)?;
    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = file.systems.iter().find(|s| !seen.insert(s.id.as_str())) {
        return Err(Error::InvalidInput(format!(
            "duplicate system id '{}'",
            dup.id
        )));
    }
    Ok(file.systems)
}

pub fn load_systems(path: &Path) -> Result<Vec<SystemInstance>> {
    parse_systems(&read_file(path)?)
}

pub fn parse_scoring_requests(json: &str) -> Result<Vec<ScoringRequest>> {
    Ok(match serde_json::from_str::<RequestsFile>(json)? {
        RequestsFile::Many(requests) => requests,
        RequestsFile::One(request) => vec![*request],
    })
}

pub fn load_scoring_requests(path: &Path) -> Result<Vec<ScoringRequest>> {
    parse_scoring_requests(&read_file(path)?)
}
