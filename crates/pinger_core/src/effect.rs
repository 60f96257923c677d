use std::path::PathBuf;

use crate::ResultRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Validate the typed host and start a continuous run against it.
    ResolveAndStart { input: String },
    /// Load the host list at `path` and start a list run.
    LoadListAndStart { path: PathBuf },
    StopRun,
    Export { path: PathBuf, rows: Vec<ResultRow> },
}
