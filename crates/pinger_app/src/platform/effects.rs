use std::sync::{mpsc, Arc};

use pinger_core::{Effect, Msg, ProbeResult, ResultRow, RunEnd, RunMode};
use pinger_engine::{
    load_list, resolve_single, write_results, EventSink, ExportRow, FinishReason, ProbeEvent,
    ProbeOutcome, ProbeRunner, ProbeSettings, RunTarget,
};
use pinger_logging::{pinger_info, pinger_warn};

/// Forwards engine events into the caller's message queue.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ProbeEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

pub struct EffectRunner {
    runner: ProbeRunner,
}

impl EffectRunner {
    pub fn new(settings: ProbeSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let sink = Arc::new(MsgSink { msg_tx });
        Self {
            runner: ProbeRunner::new(settings, sink),
        }
    }

    #[cfg(test)]
    pub(super) fn with_prober(
        prober: Arc<dyn pinger_engine::Prober>,
        settings: ProbeSettings,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let sink = Arc::new(MsgSink { msg_tx });
        Self {
            runner: ProbeRunner::with_prober(prober, settings, sink),
        }
    }

    /// Executes effects in order. Returns follow-up messages that must be
    /// dispatched before anything else in the queue.
    pub fn execute(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::ResolveAndStart { input } => {
                    let msg = match resolve_single(&input) {
                        Ok(host) => {
                            pinger_info!("ResolveAndStart host={}", host);
                            self.start(RunTarget::Single(host))
                        }
                        Err(err) => rejected(err.to_string()),
                    };
                    follow_ups.push(msg);
                }
                Effect::LoadListAndStart { path } => {
                    let msg = match load_list(&path) {
                        Ok(list) => self.start(RunTarget::List(list)),
                        Err(err) => {
                            pinger_warn!("LoadListAndStart failed: {}", err);
                            rejected(err.to_string())
                        }
                    };
                    follow_ups.push(msg);
                }
                Effect::StopRun => {
                    self.runner.stop();
                }
                Effect::Export { path, rows } => {
                    let export_rows: Vec<ExportRow> = rows.iter().map(to_export_row).collect();
                    let result = write_results(&path, &export_rows)
                        .map(|summary| summary.row_count)
                        .map_err(|err| err.to_string());
                    follow_ups.push(Msg::ExportFinished { path, result });
                }
            }
        }
        follow_ups
    }

    /// Stops the active run and waits for its worker to exit.
    pub fn shutdown(&mut self) {
        self.runner.stop();
        if let Some(handle) = self.runner.take_handle() {
            if handle.join().is_err() {
                pinger_warn!("probe worker panicked");
            }
        }
    }

    fn start(&mut self, target: RunTarget) -> Msg {
        let mode = match target {
            RunTarget::Single(_) => RunMode::Single,
            RunTarget::List(_) => RunMode::List,
        };
        match self.runner.start(target) {
            Ok(run_id) => Msg::RunStarted { run_id, mode },
            Err(err) => rejected(format!("Could not start probing: {err}")),
        }
    }
}

fn rejected(message: String) -> Msg {
    Msg::TargetRejected { message }
}

fn map_event(event: ProbeEvent) -> Msg {
    match event {
        ProbeEvent::Outcome {
            run_id,
            host,
            outcome,
        } => Msg::ProbeCompleted {
            run_id,
            host: host.into_string(),
            result: match outcome {
                ProbeOutcome::Reachable(latency) => ProbeResult::Reachable { latency },
                ProbeOutcome::Unreachable => ProbeResult::Unreachable,
                ProbeOutcome::Error(message) => ProbeResult::Error { message },
            },
        },
        ProbeEvent::Finished { run_id, reason } => Msg::RunFinished {
            run_id,
            reason: match reason {
                FinishReason::Stopped => RunEnd::Stopped,
                FinishReason::Exhausted => RunEnd::Exhausted,
                FinishReason::Failed => RunEnd::Failed,
            },
        },
    }
}

fn to_export_row(row: &ResultRow) -> ExportRow {
    let outcome = match &row.result {
        ProbeResult::Reachable { latency } => ProbeOutcome::Reachable(*latency),
        ProbeResult::Unreachable => ProbeOutcome::Unreachable,
        ProbeResult::Error { message } => ProbeOutcome::Error(message.clone()),
    };
    ExportRow::from_outcome(&row.host, &outcome)
}
