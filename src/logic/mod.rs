pub mod actions;
pub mod api;
pub mod error;
pub mod notifier;
pub mod poller;

#[cfg(test)]
pub(crate) mod fake_api;

use crate::model::AppState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use actions::HostActions;
pub use api::{HttpApi, WolApi};
pub use error::ApiError;
pub use notifier::{NotificationHandle, Notifier};
pub use poller::{StatusPoller, load_hosts, refresh_statuses};

pub type SharedState = Arc<Mutex<AppState>>;

/// Locks the shared state. A panic in another holder leaves the state usable,
/// so poisoning is ignored.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What every network task needs: the server, the state it updates and the
/// alert region it reports to.
#[derive(Clone)]
pub struct ClientContext {
    pub api: Arc<dyn WolApi>,
    pub state: SharedState,
    pub notifier: Arc<Notifier>,
}

impl ClientContext {
    pub fn new(api: Arc<dyn WolApi>, state: SharedState) -> Self {
        let notifier = Arc::new(Notifier::new(state.clone()));
        Self {
            api,
            state,
            notifier,
        }
    }
}
