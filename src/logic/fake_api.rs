//! In-memory `WolApi` for unit tests.

use super::error::{ApiError, Result};
use super::{ClientContext, WolApi};
use crate::model::{AppState, Host, HostStatus};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Wake(String),
    Hosts,
    AddHost(Host),
    DeleteHost(String),
    Statuses,
}

pub struct Responses {
    pub wake: Result<()>,
    pub add_host: Result<()>,
    pub delete_host: Result<()>,
    pub hosts: Result<Vec<Host>>,
    pub statuses: Result<Vec<HostStatus>>,
}

impl Default for Responses {
    fn default() -> Self {
        Self {
            wake: Ok(()),
            add_host: Ok(()),
            delete_host: Ok(()),
            hosts: Ok(Vec::new()),
            statuses: Ok(Vec::new()),
        }
    }
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<Responses>,
    latency: Duration,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call sleeps `latency` before answering.
    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency,
            ..Self::default()
        })
    }

    pub fn respond(&self, change: impl FnOnce(&mut Responses)) {
        change(&mut self.responses.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer<T>(&self, call: Call, pick: impl FnOnce(&Responses) -> Result<T>) -> Result<T> {
        self.calls.lock().unwrap().push(call);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        pick(&self.responses.lock().unwrap())
    }
}

#[async_trait]
impl WolApi for FakeApi {
    async fn wake(&self, mac: &str) -> Result<()> {
        self.answer(Call::Wake(mac.to_string()), |r| r.wake.clone())
            .await
    }

    async fn hosts(&self) -> Result<Vec<Host>> {
        self.answer(Call::Hosts, |r| r.hosts.clone()).await
    }

    async fn add_host(&self, host: &Host) -> Result<()> {
        self.answer(Call::AddHost(host.clone()), |r| r.add_host.clone())
            .await
    }

    async fn delete_host(&self, mac: &str) -> Result<()> {
        self.answer(Call::DeleteHost(mac.to_string()), |r| {
            r.delete_host.clone()
        })
        .await
    }

    async fn statuses(&self) -> Result<Vec<HostStatus>> {
        self.answer(Call::Statuses, |r| r.statuses.clone()).await
    }
}

pub fn rejected(reason: &str) -> ApiError {
    ApiError::Rejected {
        status: 400,
        reason: reason.to_string(),
    }
}

pub fn transport() -> ApiError {
    ApiError::Transport("connection refused".to_string())
}

pub fn context(api: Arc<FakeApi>) -> ClientContext {
    ClientContext::new(api, Arc::new(Mutex::new(AppState::default())))
}

pub fn host(name: &str, mac: &str) -> Host {
    Host::new(name, mac, "")
}

pub fn status(mac: &str, online: bool, address: &str) -> HostStatus {
    HostStatus {
        mac: mac.to_string(),
        online,
        address: address.to_string(),
        error: None,
    }
}
