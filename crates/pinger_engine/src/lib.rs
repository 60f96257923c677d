//! Pinger engine: target loading, probe runs and result export.
mod export;
mod persist;
mod probe;
mod record;
mod runner;
mod target;
mod types;

pub use export::{
    parse_results, read_results, render_results, write_results, ExportError, ExportRow,
    ExportStatus, ExportSummary, EXPORT_HEADER, NO_TIME_SENTINEL,
};
pub use persist::{ensure_parent_dir, write_atomic, PersistError};
pub use probe::{ChannelEventSink, EventSink, IcmpProber, ProbeSettings, Prober, TransportError};
pub use runner::{ProbeRunner, RunHandle};
pub use target::{load_list, parse_list, resolve_single, TargetError};
pub use types::{
    FinishReason, HostSpec, ProbeEvent, ProbeOutcome, RunId, RunMode, RunState, RunTarget,
    TargetList,
};
