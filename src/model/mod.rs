pub mod app_state;
pub mod host;
pub mod mac;
pub mod notification;

pub use app_state::AppState;
pub use host::{Host, HostStatus, StatusDisplay, WakeButton, WakeLabel};
pub use mac::{InvalidMac, MacAddress, is_valid_hostname};
pub use notification::{Notification, Politeness, Severity};
