use chrono::{DateTime, Local};

/// Severity of a notification. Also selects its colour in the alert region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Warning,
    Danger,
}

/// How urgently assistive technology should announce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// Announced when the user is idle.
    Polite,
    /// Interrupts the user.
    Assertive,
}

impl Severity {
    pub fn politeness(self) -> Politeness {
        match self {
            Severity::Success => Politeness::Polite,
            Severity::Warning | Severity::Danger => Politeness::Assertive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

/// A dismissible message in the alert region.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created: DateTime<Local>,
}

impl Notification {
    pub fn new(id: u64, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id,
            message: message.into(),
            severity,
            created: Local::now(),
        }
    }
}
