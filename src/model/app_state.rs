use super::host::{Host, StatusDisplay, WakeButton};
use super::notification::Notification;
use std::collections::HashMap;

/// Everything the UI draws. Shared between the egui thread and network tasks.
#[derive(Debug, Default)]
pub struct AppState {
    /// Host list as last fetched from the server.
    pub hosts: Vec<Host>,
    /// Status cell of every listed host, keyed by MAC.
    pub statuses: HashMap<String, StatusDisplay>,
    /// Dedicated wake button of every listed host, keyed by MAC.
    pub wake_buttons: HashMap<String, WakeButton>,
    /// The alert region, oldest first.
    pub notifications: Vec<Notification>,
    pub add_host_dialog_open: bool,
    /// Set once a host list has been received from the server.
    pub hosts_loaded: bool,
}

impl AppState {
    /// Replaces the host list. Status cells and buttons of hosts that are still
    /// listed keep their state, the others are dropped.
    pub fn set_hosts(&mut self, hosts: Vec<Host>) {
        self.statuses.retain(|mac, _| hosts.iter().any(|h| &h.mac == mac));
        self.wake_buttons
            .retain(|mac, _| hosts.iter().any(|h| &h.mac == mac));
        for host in &hosts {
            self.statuses.entry(host.mac.clone()).or_default();
            self.wake_buttons.entry(host.mac.clone()).or_default();
        }
        self.hosts = hosts;
        self.hosts_loaded = true;
    }

    /// Removes the notification with `id`. Returns `false` if it was already gone.
    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Severity, WakeLabel};

    fn host(mac: &str, name: &str) -> Host {
        Host::new(name, mac, "")
    }

    #[test]
    fn test_set_hosts_creates_and_prunes_elements() {
        let mut state = AppState::default();
        state.set_hosts(vec![
            host("AA:AA:AA:AA:AA:AA", "a"),
            host("BB:BB:BB:BB:BB:BB", "b"),
        ]);
        assert_eq!(state.statuses.len(), 2);
        assert_eq!(state.wake_buttons.len(), 2);

        state.statuses.get_mut("AA:AA:AA:AA:AA:AA").unwrap().online = Some(true);
        state
            .wake_buttons
            .get_mut("AA:AA:AA:AA:AA:AA")
            .unwrap()
            .label = WakeLabel::Waking;

        state.set_hosts(vec![host("AA:AA:AA:AA:AA:AA", "a")]);
        assert_eq!(state.hosts.len(), 1);
        assert!(!state.statuses.contains_key("BB:BB:BB:BB:BB:BB"));
        assert!(!state.wake_buttons.contains_key("BB:BB:BB:BB:BB:BB"));
        assert_eq!(state.statuses["AA:AA:AA:AA:AA:AA"].online, Some(true));
        assert_eq!(
            state.wake_buttons["AA:AA:AA:AA:AA:AA"].label,
            WakeLabel::Waking
        );
    }

    #[test]
    fn test_dismiss_notification_is_idempotent() {
        let mut state = AppState::default();
        state
            .notifications
            .push(Notification::new(7, "hello", Severity::Success));
        assert!(state.dismiss_notification(7));
        assert!(!state.dismiss_notification(7));
        assert!(state.notifications.is_empty());
    }
}
