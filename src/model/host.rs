use serde::{Deserialize, Serialize};
use tr::tr;

/// A host known to the server, keyed by its MAC address.
///
/// The server accepts the capitalized field names on input and answers with
/// lower-case ones, so both spellings are accepted when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    #[serde(rename = "MAC", alias = "mac")]
    pub mac: String,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(
        rename = "Address",
        alias = "address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
}

impl Host {
    /// Builds a host record from form input. A blank address is left out.
    pub fn new(name: &str, mac: &str, address: &str) -> Self {
        Self {
            mac: mac.to_string(),
            name: name.to_string(),
            address: if address.trim().is_empty() {
                None
            } else {
                Some(address.to_string())
            },
        }
    }
}

/// One entry of the server's status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostStatus {
    pub mac: String,
    pub online: bool,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostStatus {
    /// The error reported for this host, if any. Empty strings do not count.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// What the host table shows in a host's status cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusDisplay {
    /// `None` until the first successful poll.
    pub online: Option<bool>,
    pub address: String,
}

impl StatusDisplay {
    pub fn glyph(&self) -> &'static str {
        match self.online {
            Some(true) => "●",
            Some(false) => "○",
            None => "?",
        }
    }

    pub fn text(&self) -> String {
        let state = match self.online {
            Some(true) => tr!("online"),
            Some(false) => tr!("offline"),
            None => tr!("unknown"),
        };
        if self.address.is_empty() {
            format!("{} {}", self.glyph(), state)
        } else {
            format!("{} {} {}", self.glyph(), state, self.address)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WakeLabel {
    #[default]
    Idle,
    Waking,
    Woken,
    Failed,
}

impl WakeLabel {
    pub fn text(self) -> String {
        match self {
            WakeLabel::Idle => tr!("Wake"),
            WakeLabel::Waking => tr!("Waking..."),
            WakeLabel::Woken => tr!("✔ Woken up"),
            WakeLabel::Failed => tr!("✖ Failed"),
        }
    }
}

/// The dedicated wake button of a listed host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeButton {
    pub label: WakeLabel,
    pub enabled: bool,
}

impl Default for WakeButton {
    fn default() -> Self {
        Self {
            label: WakeLabel::Idle,
            enabled: true,
        }
    }
}
