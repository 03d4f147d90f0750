use super::error::{ApiError, Result};
use crate::model::{Host, HostStatus};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const WAKE_PATH: &str = "/api/v1/wake";
const HOSTS_PATH: &str = "/api/v1/hosts";
const STATUS_PATH: &str = "/api/v1/hosts/status";

/// Body of every non-listing answer of the server.
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    reason: String,
}

/// The REST API of the Wake-on-LAN server.
#[async_trait]
pub trait WolApi: Send + Sync {
    /// Asks the server to send a magic packet to `mac`.
    async fn wake(&self, mac: &str) -> Result<()>;
    async fn hosts(&self) -> Result<Vec<Host>>;
    async fn add_host(&self, host: &Host) -> Result<()>;
    async fn delete_host(&self, mac: &str) -> Result<()>;
    async fn statuses(&self) -> Result<Vec<HostStatus>>;
}

/// `WolApi` over HTTP.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes the body before looking at the status: a body that is not JSON
    /// is a transport failure even on an error status.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            let ApiResponse { reason } = serde_json::from_slice(&body)?;
            Err(ApiError::Rejected {
                status: status.as_u16(),
                reason,
            })
        }
    }
}

#[async_trait]
impl WolApi for HttpApi {
    async fn wake(&self, mac: &str) -> Result<()> {
        let url = self.url(&format!("{WAKE_PATH}/{mac}"));
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Self::decode::<ApiResponse>(response).await.map(|_| ())
    }

    async fn hosts(&self) -> Result<Vec<Host>> {
        let url = self.url(HOSTS_PATH);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn add_host(&self, host: &Host) -> Result<()> {
        let url = self.url(HOSTS_PATH);
        log::debug!("PUT {url} ({})", host.mac);
        let response = self.client.put(&url).json(host).send().await?;
        Self::decode::<ApiResponse>(response).await.map(|_| ())
    }

    async fn delete_host(&self, mac: &str) -> Result<()> {
        let url = self.url(&format!("{HOSTS_PATH}/{mac}"));
        log::debug!("DELETE {url}");
        let response = self.client.delete(&url).send().await?;
        Self::decode::<ApiResponse>(response).await.map(|_| ())
    }

    async fn statuses(&self) -> Result<Vec<HostStatus>> {
        let url = self.url(STATUS_PATH);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }
}
