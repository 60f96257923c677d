use std::fmt;
use std::time::Duration;

pub type RunId = u64;

/// A host name or IP address as typed or loaded, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostSpec(String);

impl HostSpec {
    /// Trims `raw`; returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HostSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HostSpec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered hosts for a list run. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList(Vec<HostSpec>);

impl TargetList {
    pub(crate) fn new(hosts: Vec<HostSpec>) -> Option<Self> {
        if hosts.is_empty() {
            None
        } else {
            Some(Self(hosts))
        }
    }

    pub fn hosts(&self) -> &[HostSpec] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostSpec> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a HostSpec;
    type IntoIter = std::slice::Iter<'a, HostSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    /// Probe one host repeatedly until stopped.
    Single(HostSpec),
    /// Probe each host once, in order.
    List(TargetList),
}

impl RunTarget {
    pub fn mode(&self) -> RunMode {
        match self {
            RunTarget::Single(_) => RunMode::Single,
            RunTarget::List(_) => RunMode::List,
        }
    }

    /// The host probed first, used to report failures that happen before any probe.
    pub(crate) fn first_host(&self) -> &HostSpec {
        match self {
            RunTarget::Single(host) => host,
            // TargetList is never empty.
            RunTarget::List(list) => &list.0[0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    RunningSingle,
    RunningList,
}

impl RunState {
    pub fn is_running(self) -> bool {
        !matches!(self, RunState::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable(Duration),
    Unreachable,
    Error(String),
}

impl ProbeOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ProbeOutcome::Error(_))
    }

    pub fn latency(&self) -> Option<Duration> {
        match self {
            ProbeOutcome::Reachable(latency) => Some(*latency),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable(latency) => {
                write!(f, "reachable in {:.2} ms", latency.as_secs_f64() * 1000.0)
            }
            ProbeOutcome::Unreachable => write!(f, "unreachable"),
            ProbeOutcome::Error(message) => write!(f, "error: {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// `stop()` was called, or the run was superseded by a newer one.
    Stopped,
    /// Every host in the list was probed.
    Exhausted,
    /// A single-host run hit a transport error.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    Outcome {
        run_id: RunId,
        host: HostSpec,
        outcome: ProbeOutcome,
    },
    Finished {
        run_id: RunId,
        reason: FinishReason,
    },
}

impl ProbeEvent {
    pub fn run_id(&self) -> RunId {
        match self {
            ProbeEvent::Outcome { run_id, .. } | ProbeEvent::Finished { run_id, .. } => *run_id,
        }
    }
}
