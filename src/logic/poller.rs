use super::{ApiError, ClientContext, lock_state};
use crate::model::HostStatus;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tr::tr;

/// Fetches the status of all hosts once and updates their status cells.
///
/// Entries for hosts that are not listed are skipped. An entry carrying an
/// error raises a warning and keeps its cell at the last known state; the rest
/// of the batch is still applied. When the whole request fails every cell
/// keeps its last known state.
pub async fn refresh_statuses(ctx: &ClientContext) {
    match ctx.api.statuses().await {
        Ok(statuses) => apply_statuses(ctx, statuses),
        Err(ApiError::Rejected { reason, .. }) => {
            ctx.notifier
                .warning(format!("{}: {}", tr!("Failed to fetch host status"), reason));
        }
        Err(err @ ApiError::Transport(_)) => {
            log::error!("Failed to fetch host status: {err}");
            ctx.notifier.danger(tr!("Failed to fetch host status"));
        }
    }
}

/// Replaces the host list with the server's. Returns `false` and keeps the
/// current list if the request fails.
pub async fn load_hosts(ctx: &ClientContext) -> bool {
    match ctx.api.hosts().await {
        Ok(hosts) => {
            log::debug!("Loaded {} hosts", hosts.len());
            lock_state(&ctx.state).set_hosts(hosts);
            true
        }
        Err(ApiError::Rejected { reason, .. }) => {
            ctx.notifier
                .warning(format!("{}: {}", tr!("Failed to fetch hosts"), reason));
            false
        }
        Err(err @ ApiError::Transport(_)) => {
            log::error!("Failed to fetch hosts: {err}");
            ctx.notifier.danger(tr!("Failed to fetch hosts"));
            false
        }
    }
}

fn apply_statuses(ctx: &ClientContext, statuses: Vec<HostStatus>) {
    let mut failures = Vec::new();
    {
        let mut state = lock_state(&ctx.state);
        for status in statuses {
            if let Some(error) = status.error() {
                failures.push(format!(
                    "{} {}: {}",
                    tr!("Failed to check status of"),
                    status.mac,
                    error
                ));
                continue;
            }
            match state.statuses.get_mut(&status.mac) {
                Some(display) => {
                    display.online = Some(status.online);
                    display.address = status.address;
                }
                None => log::warn!("No status cell for host {}, skipping", status.mac),
            }
        }
    }
    // The notifier takes the state lock itself.
    for message in failures {
        ctx.notifier.warning(message);
    }
}

/// Background task refreshing host statuses on a fixed schedule.
pub struct StatusPoller {
    ctx: ClientContext,
    period: Duration,
}

impl StatusPoller {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(30);

    pub fn new(ctx: ClientContext, period: Duration) -> Self {
        Self { ctx, period }
    }

    /// Refreshes immediately, then every period. Each refresh runs as its own
    /// task, so a slow or failing refresh neither delays nor cancels the next.
    ///
    /// Until a host list has been received, each tick fetches the hosts first.
    /// Missed ticks are not made up for.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let ctx = self.ctx.clone();
            tokio::spawn(async move {
                let loaded = lock_state(&ctx.state).hosts_loaded;
                if loaded || load_hosts(&ctx).await {
                    refresh_statuses(&ctx).await;
                }
            });
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
