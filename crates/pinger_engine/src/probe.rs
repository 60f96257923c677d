use std::cell::RefCell;
use std::fmt::Display;
use std::net::IpAddr;
use std::sync::mpsc;
use std::time::Duration;

use pinger_logging::pinger_trace;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError, ICMP};
use thiserror::Error;

use crate::{HostSpec, ProbeEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// How long a single echo waits for its reply.
    pub timeout: Duration,
    /// Bytes of payload carried by each echo request.
    pub payload_size: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            payload_size: 56,
        }
    }
}

/// The probe itself could not be carried out. A missing reply is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("cannot resolve {host}: {message}")]
    Resolve { host: String, message: String },
    #[error("socket error: {0}")]
    Socket(String),
}

/// Receives every event a probe run produces. Called from the worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ProbeEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ProbeEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ProbeEvent>) -> Self {
        Self { tx }
    }

    pub fn pair() -> (Self, mpsc::Receiver<ProbeEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ProbeEvent) {
        let _ = self.tx.send(event);
    }
}

/// One ICMP echo against one host.
///
/// Returns the round-trip time, `None` when no reply arrived within
/// `timeout`, or a [`TransportError`] when the echo could not be sent.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(
        &self,
        host: &HostSpec,
        timeout: Duration,
    ) -> Result<Option<Duration>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct IcmpProber {
    payload_size: usize,
}

impl IcmpProber {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            payload_size: settings.payload_size,
        }
    }

    async fn resolve(host: &HostSpec) -> Result<IpAddr, TransportError> {
        if let Ok(ip) = host.as_str().parse::<IpAddr>() {
            return Ok(ip);
        }
        let resolve_error = |message: String| TransportError::Resolve {
            host: host.to_string(),
            message,
        };
        let mut addrs = tokio::net::lookup_host((host.as_str(), 0))
            .await
            .map_err(|err| resolve_error(err.to_string()))?;
        addrs
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| resolve_error("no addresses found".to_string()))
    }
}

#[async_trait::async_trait]
impl Prober for IcmpProber {
    async fn probe(
        &self,
        host: &HostSpec,
        timeout: Duration,
    ) -> Result<Option<Duration>, TransportError> {
        let ip = Self::resolve(host).await?;
        let client =
            RUN_CLIENTS.with(|clients| clients.borrow_mut().get_or_open(ip, open_client))?;

        let payload = vec![0u8; self.payload_size];
        let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
        pinger.timeout(timeout);

        let reply = map_reply(pinger.ping(PingSequence(0), &payload).await);
        if let Ok(Some(rtt)) = reply {
            pinger_trace!("echo reply from {} ({}) in {:?}", host, ip, rtt);
        }
        reply
    }
}

thread_local! {
    // Each run owns a worker thread and its runtime, and a client only works
    // on the runtime that opened it, so the cache lives per thread.
    static RUN_CLIENTS: RefCell<ClientCache<Client>> = RefCell::new(ClientCache::default());
}

/// Drops the ICMP clients opened on this thread. Call it before the runtime
/// that opened them shuts down.
pub(crate) fn close_run_clients() {
    RUN_CLIENTS.with(|clients| clients.borrow_mut().clear());
}

/// One client per address family, opened on first use.
#[derive(Debug)]
struct ClientCache<C> {
    v4: Option<C>,
    v6: Option<C>,
}

impl<C> Default for ClientCache<C> {
    fn default() -> Self {
        Self { v4: None, v6: None }
    }
}

impl<C: Clone> ClientCache<C> {
    fn get_or_open<E>(
        &mut self,
        ip: IpAddr,
        open: impl FnOnce(IpAddr) -> Result<C, E>,
    ) -> Result<C, E> {
        let slot = match ip {
            IpAddr::V4(_) => &mut self.v4,
            IpAddr::V6(_) => &mut self.v6,
        };
        if let Some(client) = slot {
            return Ok(client.clone());
        }
        let client = open(ip)?;
        *slot = Some(client.clone());
        Ok(client)
    }

    fn clear(&mut self) {
        self.v4 = None;
        self.v6 = None;
    }
}

fn open_client(ip: IpAddr) -> Result<Client, TransportError> {
    let config = match ip {
        IpAddr::V4(_) => Config::default(),
        IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
    };
    pinger_trace!("opening ICMP client for {}", ip);
    Client::new(&config).map_err(socket_error)
}

fn socket_error(err: impl Display) -> TransportError {
    TransportError::Socket(err.to_string())
}

/// A timeout means the host did not answer. Every other failure means the
/// echo never made it onto the wire.
fn map_reply<P>(
    reply: Result<(P, Duration), SurgeError>,
) -> Result<Option<Duration>, TransportError> {
    match reply {
        Ok((_packet, rtt)) => Ok(Some(rtt)),
        Err(SurgeError::Timeout { .. }) => Ok(None),
        Err(err) => Err(socket_error(err)),
    }
}
