use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use pinger_core::{
    update, AppState, Effect, Msg, ProbeResult, RunEnd, RunMode, SessionState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pinger_logging::initialize_for_tests);
}

fn started(state: AppState, msg: Msg, run_id: u64, mode: RunMode) -> AppState {
    let (state, _effects) = update(state, msg);
    let (state, effects) = update(state, Msg::RunStarted { run_id, mode });
    assert!(effects.is_empty());
    state
}

#[test]
fn blank_host_reports_once_and_starts_nothing() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::HostSubmitted("   ".into()));

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert_eq!(state.messages().len(), 1);
    assert!(state.messages()[0].starts_with("Enter a host"));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn host_submit_starts_single_run() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::HostSubmitted(" example.com ".into()));

    assert_eq!(state.session(), SessionState::RunningSingle);
    assert_eq!(state.active_run(), None);
    assert_eq!(
        effects,
        vec![Effect::ResolveAndStart {
            input: " example.com ".into()
        }]
    );

    let (state, effects) = update(
        state,
        Msg::RunStarted {
            run_id: 1,
            mode: RunMode::Single,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.active_run(), Some(1));
}

#[test]
fn list_submit_starts_list_run() {
    init_logging();
    let path = PathBuf::from("pinglist.csv");
    let (state, effects) = update(AppState::new(), Msg::ListSubmitted(path.clone()));

    assert_eq!(state.session(), SessionState::RunningList);
    assert_eq!(effects, vec![Effect::LoadListAndStart { path }]);
}

#[test]
fn rejected_target_returns_to_idle_with_one_message() {
    init_logging();
    let (state, _effects) = update(AppState::new(), Msg::ListSubmitted("empty.csv".into()));
    let (state, effects) = update(
        state,
        Msg::TargetRejected {
            message: "the host list contains no hosts".into(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
    assert_eq!(state.messages(), ["the host list contains no hosts"]);
}

#[test]
fn list_scenario_records_results_in_order_and_goes_idle() {
    init_logging();
    let state = started(
        AppState::new(),
        Msg::ListSubmitted("hosts.csv".into()),
        7,
        RunMode::List,
    );

    let (state, _) = update(
        state,
        Msg::ProbeCompleted {
            run_id: 7,
            host: "10.0.0.1".into(),
            result: ProbeResult::Reachable {
                latency: Duration::from_millis(12),
            },
        },
    );
    let (state, _) = update(
        state,
        Msg::ProbeCompleted {
            run_id: 7,
            host: "256.1.1.1".into(),
            result: ProbeResult::Unreachable,
        },
    );
    let (state, _) = update(
        state,
        Msg::RunFinished {
            run_id: 7,
            reason: RunEnd::Exhausted,
        },
    );

    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    assert_eq!(view.result_count, 2);
    assert_eq!(view.reachable_count, 1);
    let rows: Vec<_> = view
        .rows
        .iter()
        .map(|r| (r.host.as_str(), r.time_text.as_str(), r.status_text.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("10.0.0.1", "12.00 ms", "Reachable"),
            ("256.1.1.1", "N/A", "Unreachable"),
        ]
    );
    assert_eq!(view.messages, vec!["Finished pinging the list."]);
}

#[test]
fn failed_single_run_shows_error_row() {
    init_logging();
    let state = started(
        AppState::new(),
        Msg::HostSubmitted("nowhere.invalid".into()),
        2,
        RunMode::Single,
    );
    let (state, _) = update(
        state,
        Msg::ProbeCompleted {
            run_id: 2,
            host: "nowhere.invalid".into(),
            result: ProbeResult::Error {
                message: "cannot resolve nowhere.invalid".into(),
            },
        },
    );
    let (state, _) = update(
        state,
        Msg::RunFinished {
            run_id: 2,
            reason: RunEnd::Failed,
        },
    );

    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    assert_eq!(
        view.rows[0].status_text,
        "Error: cannot resolve nowhere.invalid"
    );
    assert_eq!(view.messages, vec!["Stopped after a probe error."]);
}
