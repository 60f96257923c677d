use std::fs;
use std::path::Path;
use std::time::Duration;

use log::LevelFilter;
use pinger_engine::ProbeSettings;
use pinger_logging::{pinger_info, pinger_warn};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "pinger.ron";

/// Settings read from `pinger.ron`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub timeout_ms: u64,
    pub payload_size: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let probe = ProbeSettings::default();
        Self {
            timeout_ms: probe.timeout.as_millis() as u64,
            payload_size: probe.payload_size,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_millis(self.timeout_ms),
            payload_size: self.payload_size,
        }
    }

    pub(crate) fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Reads the config file. Runs before logging is up, so problems are
/// returned as warnings for the caller to log once it can.
pub(crate) fn load_config(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

pub(crate) fn report_config(path: &Path, config: &AppConfig, warning: Option<String>) {
    match warning {
        Some(warning) => pinger_warn!("{}; using defaults", warning),
        None => pinger_info!("Using config {:?} from {:?}", config, path),
    }
}
