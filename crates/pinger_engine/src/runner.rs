use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pinger_logging::{pinger_debug, pinger_error, pinger_info, pinger_warn};
use tokio_util::sync::CancellationToken;

use crate::probe::{EventSink, IcmpProber, ProbeSettings, Prober, TransportError};
use crate::{FinishReason, HostSpec, ProbeEvent, ProbeOutcome, RunId, RunMode, RunState, RunTarget};

/// A started run. Dropping it detaches the worker; it keeps running until
/// stopped or finished.
pub struct RunHandle {
    run_id: RunId,
    mode: RunMode,
    cancel: CancellationToken,
    worker: thread::JoinHandle<()>,
}

impl RunHandle {
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Asks the worker to exit before its next probe.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// True until the run is stopped or its worker is done probing.
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && !self.worker.is_finished()
    }

    /// Waits for the worker thread to exit.
    pub fn join(self) -> thread::Result<()> {
        self.worker.join()
    }
}

/// Owns the probe lifecycle: at most one active run, each on its own worker
/// thread, reporting every outcome to the sink.
pub struct ProbeRunner {
    prober: Arc<dyn Prober>,
    settings: ProbeSettings,
    sink: Arc<dyn EventSink>,
    next_run_id: RunId,
    active: Option<RunHandle>,
}

impl ProbeRunner {
    /// Runner backed by real ICMP echoes.
    pub fn new(settings: ProbeSettings, sink: Arc<dyn EventSink>) -> Self {
        let prober = Arc::new(IcmpProber::new(&settings));
        Self::with_prober(prober, settings, sink)
    }

    pub fn with_prober(
        prober: Arc<dyn Prober>,
        settings: ProbeSettings,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            prober,
            settings,
            sink,
            next_run_id: 1,
            active: None,
        }
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Starts probing `target` on a new worker and returns without waiting.
    ///
    /// A run that is still active is stopped first; its remaining events
    /// carry its own run id.
    pub fn start(&mut self, target: RunTarget) -> io::Result<RunId> {
        if let Some(previous) = self.active.take() {
            if previous.is_active() {
                pinger_warn!(
                    "run {} superseded by a new start before it finished",
                    previous.run_id()
                );
            }
            previous.stop();
        }

        let run_id = self.next_run_id;
        self.next_run_id += 1;

        let mode = target.mode();
        let cancel = CancellationToken::new();
        let worker = spawn_worker(
            run_id,
            target,
            self.settings.timeout,
            self.prober.clone(),
            self.sink.clone(),
            cancel.clone(),
        )?;

        pinger_info!("run {} started in {:?} mode", run_id, mode);
        self.active = Some(RunHandle {
            run_id,
            mode,
            cancel,
            worker,
        });
        Ok(run_id)
    }

    /// Stops the active run, if any. A probe already in flight completes.
    pub fn stop(&mut self) {
        if let Some(handle) = &self.active {
            pinger_info!("stop requested for run {}", handle.run_id());
            handle.stop();
        }
    }

    pub fn state(&self) -> RunState {
        match &self.active {
            Some(handle) if handle.is_active() => match handle.mode() {
                RunMode::Single => RunState::RunningSingle,
                RunMode::List => RunState::RunningList,
            },
            _ => RunState::Idle,
        }
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active
            .as_ref()
            .filter(|handle| handle.is_active())
            .map(RunHandle::run_id)
    }

    /// Hands the most recent run's handle to the caller, e.g. to join it.
    pub fn take_handle(&mut self) -> Option<RunHandle> {
        self.active.take()
    }
}

fn spawn_worker(
    run_id: RunId,
    target: RunTarget,
    timeout: Duration,
    prober: Arc<dyn Prober>,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("probe-run-{run_id}"))
        .spawn(move || {
            pinger_logging::set_run_id(run_id);
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    pinger_error!("cannot build probe runtime: {}", err);
                    cancel.cancel();
                    sink.emit(ProbeEvent::Outcome {
                        run_id,
                        host: target.first_host().clone(),
                        outcome: ProbeOutcome::Error(format!("probe runtime unavailable: {err}")),
                    });
                    sink.emit(ProbeEvent::Finished {
                        run_id,
                        reason: FinishReason::Failed,
                    });
                    return;
                }
            };
            let reason = runtime.block_on(run_probes(
                run_id,
                &target,
                timeout,
                prober.as_ref(),
                sink.as_ref(),
                &cancel,
            ));
            crate::probe::close_run_clients();
            pinger_info!("finished: {:?}", reason);
            pinger_logging::clear_run_id();
        })
}

/// The probe loop. Checks `cancel` before every probe and emits each outcome
/// before dispatching the next one. Cancels `cancel` itself when it ends so
/// the run reads as idle before `Finished` is delivered.
pub(crate) async fn run_probes(
    run_id: RunId,
    target: &RunTarget,
    timeout: Duration,
    prober: &dyn Prober,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) -> FinishReason {
    let reason = match target {
        RunTarget::Single(host) => loop {
            if cancel.is_cancelled() {
                break FinishReason::Stopped;
            }
            let outcome = probe_once(prober, host, timeout).await;
            let failed = outcome.is_error();
            emit_outcome(sink, run_id, host, outcome);
            if failed {
                break FinishReason::Failed;
            }
        },
        RunTarget::List(list) => {
            let mut reason = FinishReason::Exhausted;
            for host in list {
                if cancel.is_cancelled() {
                    reason = FinishReason::Stopped;
                    break;
                }
                let outcome = probe_once(prober, host, timeout).await;
                emit_outcome(sink, run_id, host, outcome);
            }
            reason
        }
    };

    cancel.cancel();
    sink.emit(ProbeEvent::Finished { run_id, reason });
    reason
}

async fn probe_once(prober: &dyn Prober, host: &HostSpec, timeout: Duration) -> ProbeOutcome {
    classify(prober.probe(host, timeout).await)
}

fn classify(result: Result<Option<Duration>, TransportError>) -> ProbeOutcome {
    match result {
        Ok(Some(latency)) => ProbeOutcome::Reachable(latency),
        Ok(None) => ProbeOutcome::Unreachable,
        Err(err) => ProbeOutcome::Error(err.to_string()),
    }
}

fn emit_outcome(sink: &dyn EventSink, run_id: RunId, host: &HostSpec, outcome: ProbeOutcome) {
    pinger_debug!("{}: {}", host, outcome);
    sink.emit(ProbeEvent::Outcome {
        run_id,
        host: host.clone(),
        outcome,
    });
}
