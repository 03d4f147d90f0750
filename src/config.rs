//! Command line, persisted settings and the resolved client configuration.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::logic::{HostActions, StatusPoller};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Parser)]
#[command(name = "egui_wol", author, version)]
#[command(about = "Desktop client for a Wake-on-LAN host manager server")]
pub struct Cli {
    /// Base URL of the Wake-on-LAN server, remembered for the next start
    #[arg(long, env = "EGUI_WOL_SERVER_URL", value_name = "URL")]
    pub server_url: Option<String>,

    /// Seconds between host status refreshes
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server URL must start with http:// or https://, got '{0}'")]
    InvalidServerUrl(String),
}

/// Settings stored by eframe between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub poll_interval: Duration,
    pub wake_hold: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval: StatusPoller::DEFAULT_PERIOD,
            wake_hold: HostActions::DEFAULT_WAKE_HOLD,
        }
    }
}

impl ClientConfig {
    /// Command line values win over persisted settings. A broken persisted URL
    /// falls back to the default, a broken command line URL is an error.
    pub fn resolve(cli: &Cli, persisted: Option<Settings>) -> Result<Self, ConfigError> {
        let server_url = match &cli.server_url {
            Some(url) => normalize_server_url(url)?,
            None => match persisted.map(|s| normalize_server_url(&s.server_url)) {
                Some(Ok(url)) => url,
                Some(Err(err)) => {
                    log::warn!("Ignoring stored settings: {err}");
                    default_server_url()
                }
                None => default_server_url(),
            },
        };

        Ok(Self {
            server_url,
            poll_interval: Duration::from_secs(cli.poll_interval),
            ..Self::default()
        })
    }

    pub fn settings(&self) -> Settings {
        Settings {
            server_url: self.server_url.clone(),
        }
    }
}

pub fn normalize_server_url(url: &str) -> Result<String, ConfigError> {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(ConfigError::InvalidServerUrl(url.to_string()))
    }
}
