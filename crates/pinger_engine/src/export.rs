use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pinger_logging::pinger_info;
use thiserror::Error;

use crate::persist::{write_atomic, PersistError};
use crate::record::{join_record, split_record};
use crate::ProbeOutcome;

pub const EXPORT_HEADER: [&str; 3] = ["Host", "Result Time (ms)", "Status"];

/// Written in the time column when there is no latency to report.
pub const NO_TIME_SENTINEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    Reachable,
    Unreachable,
}

impl ExportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportStatus::Reachable => "Reachable",
            ExportStatus::Unreachable => "Unreachable",
        }
    }
}

impl FromStr for ExportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reachable" => Ok(ExportStatus::Reachable),
            "Unreachable" => Ok(ExportStatus::Unreachable),
            other => Err(format!("unknown status {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub host: String,
    pub time_ms: Option<f64>,
    pub status: ExportStatus,
}

impl ExportRow {
    /// Errors export as unreachable, without a time.
    pub fn from_outcome(host: &str, outcome: &ProbeOutcome) -> Self {
        match outcome.latency() {
            Some(latency) => Self {
                host: host.to_string(),
                time_ms: Some(latency.as_secs_f64() * 1000.0),
                status: ExportStatus::Reachable,
            },
            None => Self {
                host: host.to_string(),
                time_ms: None,
                status: ExportStatus::Unreachable,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("{source_name} does not start with the export header")]
    MissingHeader { source_name: String },
    #[error("{source_name} line {line}: {reason}")]
    MalformedRow {
        source_name: String,
        line: usize,
        reason: String,
    },
}

pub fn render_results(rows: &[ExportRow]) -> String {
    let mut buffer = join_record(&EXPORT_HEADER);
    buffer.push('\n');
    for row in rows {
        let time = match row.time_ms {
            Some(ms) => format!("{ms:.2}"),
            None => NO_TIME_SENTINEL.to_string(),
        };
        buffer.push_str(&join_record(&[row.host.as_str(), time.as_str(), row.status.as_str()]));
        buffer.push('\n');
    }
    buffer
}

/// Writes the header plus one line per row, in order, replacing `path`.
pub fn write_results(path: &Path, rows: &[ExportRow]) -> Result<ExportSummary, ExportError> {
    let output_path = write_atomic(path, &render_results(rows))?;
    pinger_info!("exported {} results to {:?}", rows.len(), output_path);
    Ok(ExportSummary {
        row_count: rows.len(),
        output_path,
    })
}

pub fn read_results(path: &Path) -> Result<Vec<ExportRow>, ExportError> {
    let text = fs::read_to_string(path)?;
    parse_results(&text, &path.display().to_string())
}

/// Parses export text. `source_name` only labels errors.
pub fn parse_results(text: &str, source_name: &str) -> Result<Vec<ExportRow>, ExportError> {
    let mut lines = text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty());

    let header_ok = lines
        .next()
        .map(|(_, line)| split_record(line) == EXPORT_HEADER)
        .unwrap_or(false);
    if !header_ok {
        return Err(ExportError::MissingHeader {
            source_name: source_name.to_string(),
        });
    }

    let malformed = |index: usize, reason: String| ExportError::MalformedRow {
        source_name: source_name.to_string(),
        line: index + 1,
        reason,
    };

    let mut rows = Vec::new();
    for (index, line) in lines {
        let fields = split_record(line);
        let [host, time, status] = fields.as_slice() else {
            return Err(malformed(index, format!("expected 3 fields, got {}", fields.len())));
        };
        let time_ms = if time == NO_TIME_SENTINEL {
            None
        } else {
            let ms = time
                .parse::<f64>()
                .map_err(|err| malformed(index, format!("bad time {time:?}: {err}")))?;
            Some(ms)
        };
        let status = status.parse().map_err(|reason| malformed(index, reason))?;
        rows.push(ExportRow {
            host: host.clone(),
            time_ms,
            status,
        });
    }
    Ok(rows)
}
