use std::io::{self, Write};

use pinger_core::{AppViewModel, ResultRowView, SessionState, ViewCursor};

const HOST_WIDTH: usize = 32;
const TIME_WIDTH: usize = 12;

/// Prints result rows and status messages as they are appended. Only what
/// was not printed before is written, so the output scrolls like a log.
///
/// Feed it `state.view_since(renderer.cursor())` so each row is formatted once.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    cursor: ViewCursor,
    header_shown: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything before this position has been printed.
    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn render(&mut self, out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
        let mut rows_seen = self.cursor.rows;
        // The log was cleared; start over.
        if view.generation != self.cursor.generation {
            rows_seen = 0;
            self.header_shown = false;
        }

        let already_printed = rows_seen.saturating_sub(view.first_row).min(view.rows.len());
        let new_rows = &view.rows[already_printed..];
        if !self.header_shown && !new_rows.is_empty() {
            writeln!(
                out,
                "{:<HOST_WIDTH$} {:>TIME_WIDTH$}  Status",
                "Host", "Time"
            )?;
            self.header_shown = true;
        }
        for row in new_rows {
            writeln!(out, "{}", format_row(row))?;
        }

        let skip = self.cursor.messages.saturating_sub(view.first_message);
        for message in view.messages.iter().skip(skip) {
            writeln!(out, "{}", message)?;
        }

        self.cursor = view.end_cursor();
        out.flush()
    }

    pub fn summary(&self, view: &AppViewModel) -> String {
        format!(
            "Session: {} | Results: {} | Reachable: {}",
            session_label(view.session),
            view.result_count,
            view.reachable_count
        )
    }
}

fn format_row(row: &ResultRowView) -> String {
    format!(
        "{:<HOST_WIDTH$} {:>TIME_WIDTH$}  {}",
        row.host, row.time_text, row.status_text
    )
}

fn session_label(session: SessionState) -> &'static str {
    match session {
        SessionState::Idle => "Idle",
        SessionState::RunningSingle => "Pinging host",
        SessionState::RunningList => "Pinging list",
    }
}
