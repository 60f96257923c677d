use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use pinger_core::{update, AppState, Msg};
use pinger_logging::{pinger_debug, pinger_info};

use super::cli::{CommandLine, Commands};
use super::config::{self, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::render::TerminalRenderer;

const TICK_INTERVAL: Duration = Duration::from_millis(75);
/// Messages applied between two renders.
const MAX_BATCH: usize = 512;

pub fn run_app() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let config_path = commands
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let (mut app_config, warning) = config::load_config(&config_path);
    logging::initialize(commands.log, app_config.level_filter());
    config::report_config(&config_path, &app_config, warning);

    if let Some(timeout_ms) = commands.timeout_ms {
        app_config.timeout_ms = timeout_ms;
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let effects = EffectRunner::new(app_config.probe_settings(), msg_tx);
    let mut app = App::new(effects, msg_rx, stop_rx, io::stdout());

    spawn_stop_listener(stop_tx);

    let first = match commands.command {
        Commands::Host { host } => {
            println!("Pinging {host}. Press Enter to stop.");
            Msg::HostSubmitted(host)
        }
        Commands::List { file } => {
            println!("Pinging hosts from {}. Press Enter to stop early.", file.display());
            Msg::ListSubmitted(file)
        }
    };
    app.dispatch(first)?;
    app.run_until_idle()?;

    if let Some(path) = commands.export {
        app.dispatch(Msg::ExportClicked(path))?;
    }

    println!("{}", app.summary());
    app.shutdown();
    Ok(())
}

/// Caller context: owns the state, drains the message queue on one thread
/// and executes effects.
struct App<W> {
    state: AppState,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    /// Separate from `msg_rx` so a stop never waits behind queued results.
    stop_rx: mpsc::Receiver<()>,
    renderer: TerminalRenderer,
    out: W,
}

impl<W: Write> App<W> {
    fn new(
        effects: EffectRunner,
        msg_rx: mpsc::Receiver<Msg>,
        stop_rx: mpsc::Receiver<()>,
        out: W,
    ) -> Self {
        Self {
            state: AppState::new(),
            effects,
            msg_rx,
            stop_rx,
            renderer: TerminalRenderer::new(),
            out,
        }
    }

    /// Applies `msg` and its follow-ups, then renders.
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        self.apply(msg);
        self.render()
    }

    /// Applies `msg` and any follow-ups its effects produce.
    fn apply(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);
        while let Some(msg) = pending.pop_front() {
            pinger_debug!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            pending.extend(self.effects.execute(effects));
        }
    }

    /// Prints what changed since the last render.
    fn render(&mut self) -> io::Result<()> {
        if self.state.consume_dirty() {
            let view = self.state.view_since(self.renderer.cursor());
            self.renderer.render(&mut self.out, &view)?;
        }
        Ok(())
    }

    fn stop_requested(&self) -> bool {
        let mut requested = false;
        while self.stop_rx.try_recv().is_ok() {
            requested = true;
        }
        requested
    }

    /// Drains messages in batches and renders once per batch. A pending stop
    /// is applied before the next queued message.
    fn run_until_idle(&mut self) -> io::Result<()> {
        while self.state.is_running() {
            let first = if self.stop_requested() {
                Msg::StopClicked
            } else {
                match self.msg_rx.recv_timeout(TICK_INTERVAL) {
                    Ok(msg) => msg,
                    Err(mpsc::RecvTimeoutError::Timeout) => Msg::Tick,
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            };
            self.apply(first);

            let mut applied = 1;
            while applied < MAX_BATCH && self.state.is_running() {
                if self.stop_requested() {
                    self.apply(Msg::StopClicked);
                    break;
                }
                match self.msg_rx.try_recv() {
                    Ok(msg) => self.apply(msg),
                    Err(_) => break,
                }
                applied += 1;
            }
            self.render()?;
        }
        Ok(())
    }

    fn summary(&self) -> String {
        let view = self.state.view_since(self.renderer.cursor());
        self.renderer.summary(&view)
    }

    fn shutdown(&mut self) {
        self.effects.shutdown();
        pinger_info!("shut down with {} results", self.state.results().len());
    }
}

/// Any line on stdin (usually just Enter) asks the run to stop.
fn spawn_stop_listener(stop_tx: mpsc::Sender<()>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut line = String::new();
        while stdin.lock().read_line(&mut line).unwrap_or(0) > 0 {
            if stop_tx.send(()).is_err() {
                break;
            }
            line.clear();
        }
    });
}
