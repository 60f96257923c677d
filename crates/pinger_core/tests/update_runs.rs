use std::path::PathBuf;
use std::time::Duration;

use pinger_core::{update, AppState, Effect, Msg, ProbeResult, RunEnd, RunMode, SessionState};
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

fn reachable(run_id: u64, host: &str, ms: u64) -> Msg {
    Msg::ProbeCompleted {
        run_id,
        host: host.into(),
        result: ProbeResult::Reachable {
            latency: Duration::from_millis(ms),
        },
    }
}

#[test]
fn stop_emits_effect_and_ignores_late_events() {
    let state = running_single(1);
    let (state, _) = update(state, reachable(1, "example.com", 3));

    let (state, effects) = update(state, Msg::StopClicked);
    assert_eq!(effects, vec![Effect::StopRun]);
    assert_eq!(state.session(), SessionState::Idle);

    // The worker may still deliver its in-flight probe and its Finished event.
    let (state, _) = update(state, reachable(1, "example.com", 4));
    let (state, _) = update(
        state,
        Msg::RunFinished {
            run_id: 1,
            reason: RunEnd::Stopped,
        },
    );

    assert_eq!(state.results().len(), 1);
    assert_eq!(state.messages(), ["Stopped."]);
}

#[test]
fn new_start_while_running_stops_the_previous_run() {
    let state = running_single(1);

    let (state, effects) = update(state, Msg::ListSubmitted(PathBuf::from("hosts.csv")));
    assert_eq!(
        effects,
        vec![
            Effect::StopRun,
            Effect::LoadListAndStart {
                path: PathBuf::from("hosts.csv")
            },
        ]
    );
    assert_eq!(state.session(), SessionState::RunningList);

    let (state, _) = update(
        state,
        Msg::RunStarted {
            run_id: 2,
            mode: RunMode::List,
        },
    );
    let (state, _) = update(state, reachable(1, "stale.example", 1));
    let (state, _) = update(state, reachable(2, "fresh.example", 1));

    let hosts: Vec<_> = state.results().rows().iter().map(|r| r.host.clone()).collect();
    assert_eq!(hosts, vec!["fresh.example"]);
}

#[test]
fn unexpected_run_start_is_stopped() {
    let (state, effects) = update(
        AppState::new(),
        Msg::RunStarted {
            run_id: 5,
            mode: RunMode::List,
        },
    );
    assert_eq!(effects, vec![Effect::StopRun]);
    assert_eq!(state.active_run(), None);
}

#[test]
fn export_snapshots_the_log() {
    let state = running_single(1);
    let (state, _) = update(state, reachable(1, "example.com", 3));
    let (state, _) = update(state, Msg::StopClicked);

    let path = PathBuf::from("out/results.csv");
    let (state, effects) = update(state, Msg::ExportClicked(path.clone()));
    assert_eq!(
        effects,
        vec![Effect::Export {
            path: path.clone(),
            rows: state.results().rows().to_vec(),
        }]
    );

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            path,
            result: Ok(1),
        },
    );
    assert!(state.messages().last().unwrap().starts_with("Exported 1 results"));
}

#[test]
fn export_of_empty_log_only_reports() {
    let (state, effects) = update(AppState::new(), Msg::ExportClicked("x.csv".into()));
    assert!(effects.is_empty());
    assert_eq!(state.messages(), ["Nothing to export yet."]);
}

#[test]
fn clear_results_empties_the_log() {
    let state = running_single(1);
    let (state, _) = update(state, reachable(1, "example.com", 3));
    let (mut state, _) = update(state, Msg::ClearResults);

    assert!(state.results().is_empty());
    assert!(state.consume_dirty());
    let (mut state, _) = update(state, Msg::ClearResults);
    assert!(!state.consume_dirty());
}
