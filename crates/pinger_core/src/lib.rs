//! Pinger core: pure caller-side state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, ProbeResult, ResultLog, ResultRow, RunEnd, RunId, RunMode, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ResultRowView, ViewCursor, NO_TIME_TEXT};
