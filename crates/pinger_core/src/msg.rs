use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to ping the typed host.
    HostSubmitted(String),
    /// User picked a host list file.
    ListSubmitted(PathBuf),
    /// User clicked Stop.
    StopClicked,
    /// Engine accepted the target and started a run.
    RunStarted {
        run_id: crate::RunId,
        mode: crate::RunMode,
    },
    /// Engine refused the target before any probe was sent.
    TargetRejected { message: String },
    /// Engine finished one probe.
    ProbeCompleted {
        run_id: crate::RunId,
        host: String,
        result: crate::ProbeResult,
    },
    /// Engine run ended on its own or after a stop.
    RunFinished {
        run_id: crate::RunId,
        reason: crate::RunEnd,
    },
    /// User asked to export the result log.
    ExportClicked(PathBuf),
    /// Export effect finished; `Ok` carries the number of rows written.
    ExportFinished {
        path: PathBuf,
        result: Result<usize, String>,
    },
    /// User cleared the result log.
    ClearResults,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
