use super::poller::{load_hosts, refresh_statuses};
use super::{ApiError, ClientContext, SharedState, lock_state};
use crate::model::{Host, WakeButton, WakeLabel};
use std::sync::Arc;
use std::time::Duration;
use tr::tr;

/// Wake, add and delete requests triggered from the UI.
pub struct HostActions {
    ctx: ClientContext,
    wake_hold: Duration,
}

impl HostActions {
    /// How long a wake button shows the outcome before it resets.
    pub const DEFAULT_WAKE_HOLD: Duration = Duration::from_secs(1);

    pub fn new(ctx: ClientContext, wake_hold: Duration) -> Self {
        Self { ctx, wake_hold }
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    /// Sends a magic packet to `mac`.
    ///
    /// A listed host reports the outcome on its own wake button, which is
    /// disabled for the duration and always reset afterwards. Any other MAC
    /// reports through a notification.
    pub async fn wake(&self, mac: &str, name: Option<&str>) {
        let display = display_name(mac, name);
        let button = ButtonGuard::claim(&self.ctx.state, mac);

        let result = self.ctx.api.wake(mac).await;
        if let Err(ApiError::Transport(cause)) = &result {
            log::error!("Failed to send magic packet to {display}: {cause}");
        }

        match button {
            Some(button) => {
                button.show(if result.is_ok() {
                    WakeLabel::Woken
                } else {
                    WakeLabel::Failed
                });
                tokio::time::sleep(self.wake_hold).await;
            }
            None => match result {
                Ok(()) => {
                    self.ctx
                        .notifier
                        .success(format!("{} {}", tr!("Sent magic packet to"), display));
                }
                Err(ApiError::Rejected { reason, .. }) => {
                    self.ctx.notifier.warning(format!(
                        "{} {}: {}",
                        tr!("Failed to send magic packet to"),
                        display,
                        reason
                    ));
                }
                Err(ApiError::Transport(_)) => {
                    self.ctx.notifier.danger(format!(
                        "{} {}",
                        tr!("Failed to send magic packet to"),
                        display
                    ));
                }
            },
        }
    }

    /// Creates a host on the server.
    ///
    /// The add-host dialog is closed right away, before the returned future
    /// runs, and stays closed whatever the outcome.
    pub fn add_host(
        self: Arc<Self>,
        name: String,
        mac: String,
        address: String,
    ) -> impl Future<Output = ()> + Send {
        let host = Host::new(&name, &mac, &address);
        lock_state(&self.ctx.state).add_host_dialog_open = false;
        async move { self.submit_host(host).await }
    }

    async fn submit_host(&self, host: Host) {
        match self.ctx.api.add_host(&host).await {
            Ok(()) => {
                self.ctx
                    .notifier
                    .success(format!("{} {}", tr!("Added host"), host.name));
                self.reload_view().await;
            }
            Err(ApiError::Rejected { reason, .. }) => {
                self.ctx
                    .notifier
                    .warning(format!("{}: {}", tr!("Failed to add host"), reason));
            }
            Err(err @ ApiError::Transport(_)) => {
                log::error!("Failed to add host {}: {err}", host.mac);
                self.ctx
                    .notifier
                    .danger(format!("{} {}", tr!("Failed to add host"), host.name));
            }
        }
    }

    /// Removes a host after `confirm` accepts the prompt naming it.
    pub async fn delete_host(
        &self,
        mac: &str,
        name: &str,
        confirm: impl FnOnce(&str) -> bool + Send,
    ) {
        if !confirm(&delete_prompt(name)) {
            log::debug!("Deletion of {mac} declined");
            return;
        }

        match self.ctx.api.delete_host(mac).await {
            Ok(()) => {
                self.ctx
                    .notifier
                    .success(format!("{} {}", tr!("Deleted host"), name));
                self.reload_view().await;
            }
            Err(ApiError::Rejected { reason, .. }) => {
                self.ctx
                    .notifier
                    .warning(format!("{}: {}", tr!("Failed to delete host"), reason));
            }
            Err(err @ ApiError::Transport(_)) => {
                log::error!("Failed to delete host {mac}: {err}");
                self.ctx
                    .notifier
                    .danger(format!("{} {}", tr!("Failed to delete host"), name));
            }
        }
    }

    /// Refetches the host list and then the statuses of the listed hosts.
    pub async fn reload_view(&self) {
        if self.load_hosts().await {
            refresh_statuses(&self.ctx).await;
        }
    }

    /// Replaces the host list with the server's. Returns `false` and keeps the
    /// current list if the request fails.
    pub async fn load_hosts(&self) -> bool {
        load_hosts(&self.ctx).await
    }
}

/// The question asked before a host is deleted.
pub fn delete_prompt(name: &str) -> String {
    format!("{} {}?", tr!("Are you sure you want to delete"), name)
}

fn display_name(mac: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{name} ({mac})"),
        _ => mac.to_string(),
    }
}

/// Holds a host's wake button disabled. Dropping it resets the button,
/// whichever way the wake task ends.
struct ButtonGuard {
    state: SharedState,
    mac: String,
}

impl ButtonGuard {
    fn claim(state: &SharedState, mac: &str) -> Option<Self> {
        let mut guard = lock_state(state);
        let button = guard.wake_buttons.get_mut(mac)?;
        button.enabled = false;
        button.label = WakeLabel::Waking;
        Some(Self {
            state: state.clone(),
            mac: mac.to_string(),
        })
    }

    fn show(&self, label: WakeLabel) {
        if let Some(button) = lock_state(&self.state).wake_buttons.get_mut(&self.mac) {
            button.label = label;
        }
    }
}

impl Drop for ButtonGuard {
    fn drop(&mut self) {
        if let Some(button) = lock_state(&self.state).wake_buttons.get_mut(&self.mac) {
            *button = WakeButton::default();
        }
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
