use crate::{AppState, Effect, Msg, RunEnd, RunMode};

const EMPTY_HOST_MESSAGE: &str = "Enter a host name or IP address, e.g. example.com";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::HostSubmitted(input) => {
            if input.trim().is_empty() {
                state.push_message(EMPTY_HOST_MESSAGE);
                return (state, Vec::new());
            }
            let mut effects = stop_if_running(&mut state);
            state.begin_run(RunMode::Single);
            effects.push(Effect::ResolveAndStart { input });
            effects
        }
        Msg::ListSubmitted(path) => {
            let mut effects = stop_if_running(&mut state);
            state.begin_run(RunMode::List);
            effects.push(Effect::LoadListAndStart { path });
            effects
        }
        Msg::RunStarted { run_id, mode } => {
            if state.bind_run(run_id, mode) {
                Vec::new()
            } else {
                // Nothing is waiting for this run any more.
                vec![Effect::StopRun]
            }
        }
        Msg::TargetRejected { message } => {
            if state.is_running() && state.active_run().is_none() {
                state.end_run();
            }
            state.push_message(message);
            Vec::new()
        }
        Msg::StopClicked => {
            if state.is_running() {
                state.end_run();
                state.push_message("Stopped.");
                vec![Effect::StopRun]
            } else {
                Vec::new()
            }
        }
        Msg::ProbeCompleted {
            run_id,
            host,
            result,
        } => {
            if state.is_active_run(run_id) {
                state.record(host, result);
            }
            Vec::new()
        }
        Msg::RunFinished { run_id, reason } => {
            if state.is_active_run(run_id) {
                state.end_run();
                state.push_message(match reason {
                    RunEnd::Stopped => "Stopped.",
                    RunEnd::Exhausted => "Finished pinging the list.",
                    RunEnd::Failed => "Stopped after a probe error.",
                });
            }
            Vec::new()
        }
        Msg::ExportClicked(path) => {
            if state.results().is_empty() {
                state.push_message("Nothing to export yet.");
                Vec::new()
            } else {
                vec![Effect::Export {
                    path,
                    rows: state.results().rows().to_vec(),
                }]
            }
        }
        Msg::ExportFinished { path, result } => {
            match result {
                Ok(count) => {
                    state.push_message(format!("Exported {count} results to {}", path.display()))
                }
                Err(err) => {
                    state.push_message(format!("Export to {} failed: {err}", path.display()))
                }
            }
            Vec::new()
        }
        Msg::ClearResults => {
            state.clear_results();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Last start wins: a running session is stopped before the new one begins.
fn stop_if_running(state: &mut AppState) -> Vec<Effect> {
    if state.is_running() {
        state.end_run();
        vec![Effect::StopRun]
    } else {
        Vec::new()
    }
}
