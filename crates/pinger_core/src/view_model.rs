use crate::{ProbeResult, ResultRow, SessionState};

/// Shown in the time column of rows without a latency.
pub const NO_TIME_TEXT: &str = "N/A";

/// Position in the result log and message list up to which a reader has
/// already consumed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewCursor {
    pub generation: u64,
    pub rows: usize,
    pub messages: usize,
}

/// `rows` and `messages` may be a tail of the full lists. `first_row` and
/// `first_message` give the index of their first entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub rows: Vec<ResultRowView>,
    pub first_row: usize,
    pub generation: u64,
    pub result_count: usize,
    pub reachable_count: usize,
    pub messages: Vec<String>,
    pub first_message: usize,
    pub dirty: bool,
}

impl AppViewModel {
    /// Cursor just past everything this view holds.
    pub fn end_cursor(&self) -> ViewCursor {
        ViewCursor {
            generation: self.generation,
            rows: self.first_row + self.rows.len(),
            messages: self.first_message + self.messages.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub host: String,
    pub time_text: String,
    pub status_text: String,
}

impl From<&ResultRow> for ResultRowView {
    fn from(row: &ResultRow) -> Self {
        let (time_text, status_text) = match &row.result {
            ProbeResult::Reachable { latency } => (
                format!("{:.2} ms", latency.as_secs_f64() * 1000.0),
                "Reachable".to_string(),
            ),
            ProbeResult::Unreachable => (NO_TIME_TEXT.to_string(), "Unreachable".to_string()),
            ProbeResult::Error { message } => (NO_TIME_TEXT.to_string(), format!("Error: {message}")),
        };
        Self {
            host: row.host.clone(),
            time_text,
            status_text,
        }
    }
}
