use std::time::Duration;

use pinger_core::{update, AppState, Msg, ProbeResult, RunMode, ViewCursor};
use pretty_assertions::assert_eq;

fn running_single(run_id: u64) -> AppState {
    let (state, _) = update(AppState::new(), Msg::HostSubmitted("example.com".into()));
    let (state, _) = update(
        state,
        Msg::RunStarted {
            run_id,
            mode: RunMode::Single,
        },
    );
    state
}

fn completed(run_id: u64, n: u64) -> Msg {
    let result = if n % 2 == 0 {
        ProbeResult::Reachable {
            latency: Duration::from_millis(n % 50),
        }
    } else {
        ProbeResult::Unreachable
    };
    Msg::ProbeCompleted {
        run_id,
        host: "example.com".into(),
        result,
    }
}

#[test]
fn long_run_copies_each_row_once() {
    let mut state = running_single(1);
    let mut cursor = ViewCursor::default();
    let mut rows_copied = 0;

    for n in 0..10_000 {
        let (next, _) = update(state, completed(1, n));
        state = next;
        assert!(state.consume_dirty());

        let view = state.view_since(cursor);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.first_row, n as usize);
        rows_copied += view.rows.len();
        cursor = view.end_cursor();
    }

    assert_eq!(rows_copied, 10_000);
    let view = state.view_since(cursor);
    assert!(view.rows.is_empty());
    assert_eq!(view.result_count, 10_000);
    assert_eq!(view.reachable_count, 5_000);
}

#[test]
fn messages_are_returned_once() {
    let state = running_single(1);
    let cursor = state.view().end_cursor();

    let (state, _) = update(state, Msg::StopClicked);
    let view = state.view_since(cursor);
    assert_eq!(view.messages, vec!["Stopped.".to_string()]);

    assert!(state.view_since(view.end_cursor()).messages.is_empty());
}

#[test]
fn cleared_log_starts_a_new_generation() {
    let mut state = running_single(1);
    for n in 0..3 {
        state = update(state, completed(1, n)).0;
    }
    let cursor = state.view().end_cursor();
    assert_eq!(cursor.rows, 3);

    let (state, _) = update(state, Msg::ClearResults);
    let (state, _) = update(state, completed(1, 4));

    let view = state.view_since(cursor);
    assert_ne!(view.generation, cursor.generation);
    assert_eq!(view.first_row, 0);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.result_count, 1);
    assert_eq!(view.reachable_count, 1);
}
