use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pinger")]
#[command(about = "Ping a host or a list of hosts and report reachability.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Write the results to this file when the run ends
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Echo reply timeout in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Settings file to read instead of ./pinger.ron
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, global = true, default_value_t = LogTarget::File)]
    pub log: LogTarget,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ping one host continuously until Enter is pressed
    #[command(alias = "h")]
    Host { host: String },
    /// Ping every host in a comma-delimited list file once
    #[command(alias = "l")]
    List { file: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
