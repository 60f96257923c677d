use std::time::Duration;

use crate::view_model::{AppViewModel, ResultRowView, ViewCursor};

pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    RunningSingle,
    RunningList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Stopped,
    Exhausted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Reachable { latency: Duration },
    Unreachable,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub host: String,
    pub result: ProbeResult,
}

/// Append-only record of every probe result, kept for display and export.
///
/// Clearing starts a new generation so readers holding a position into the
/// old rows can tell that it no longer applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultLog {
    rows: Vec<ResultRow>,
    reachable: usize,
    generation: u64,
}

impl ResultLog {
    pub fn push(&mut self, row: ResultRow) {
        if matches!(row.result, ProbeResult::Reachable { .. }) {
            self.reachable += 1;
        }
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn reachable_count(&self) -> usize {
        self.reachable
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
        self.reachable = 0;
        self.generation += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    /// Run whose events are accepted. `None` while a start is pending.
    active_run: Option<RunId>,
    results: ResultLog,
    messages: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.session != SessionState::Idle
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active_run
    }

    pub fn results(&self) -> &ResultLog {
        &self.results
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The whole log as a view model. Prefer [`AppState::view_since`] in a
    /// render loop.
    pub fn view(&self) -> AppViewModel {
        self.view_since(ViewCursor::default())
    }

    /// A view model holding only the rows and messages added after `cursor`.
    /// The counts always cover the whole log. If the log was cleared since
    /// `cursor` was taken, the rows start over from the first one.
    pub fn view_since(&self, cursor: ViewCursor) -> AppViewModel {
        let all_rows = self.results.rows();
        let first_row = if cursor.generation == self.results.generation() {
            cursor.rows.min(all_rows.len())
        } else {
            0
        };
        let first_message = cursor.messages.min(self.messages.len());
        AppViewModel {
            session: self.session,
            rows: all_rows[first_row..].iter().map(ResultRowView::from).collect(),
            first_row,
            generation: self.results.generation(),
            result_count: all_rows.len(),
            reachable_count: self.results.reachable_count(),
            messages: self.messages[first_message..].to_vec(),
            first_message,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_run(&mut self, mode: RunMode) {
        self.session = match mode {
            RunMode::Single => SessionState::RunningSingle,
            RunMode::List => SessionState::RunningList,
        };
        self.active_run = None;
        self.dirty = true;
    }

    /// Binds the pending run to the id the engine assigned.
    pub(crate) fn bind_run(&mut self, run_id: RunId, mode: RunMode) -> bool {
        let expected = match mode {
            RunMode::Single => SessionState::RunningSingle,
            RunMode::List => SessionState::RunningList,
        };
        if self.session != expected || self.active_run.is_some() {
            return false;
        }
        self.active_run = Some(run_id);
        true
    }

    pub(crate) fn end_run(&mut self) {
        self.session = SessionState::Idle;
        self.active_run = None;
        self.dirty = true;
    }

    pub(crate) fn is_active_run(&self, run_id: RunId) -> bool {
        self.active_run == Some(run_id)
    }

    pub(crate) fn record(&mut self, host: String, result: ProbeResult) {
        self.results.push(ResultRow { host, result });
        self.dirty = true;
    }

    pub(crate) fn clear_results(&mut self) {
        if !self.results.is_empty() {
            self.results.clear();
            self.dirty = true;
        }
    }

    pub(crate) fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.dirty = true;
    }
}
