//! HTTP client for the query server.

use crate::build_info::BUILD_INFO;
use crate::protocol::{HealthResponse, QueryRequest, QueryResponse};
use crate::{Config, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Anything that can answer a [`QueryRequest`].
///
/// `Err` is always a transport failure; a server-side failure comes back as
/// `Ok` with `success == false`.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse>;
}

/// Server health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Online,
    /// The server answered but did not report `ok`.
    Degraded(String),
    Offline(String),
}

impl HealthStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, HealthStatus::Online)
    }
}

/// reqwest-backed client for `POST /query` and `GET /health`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    server_url: String,
}

impl HttpClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        Self::build(server_url.into(), None)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(config.server_url.clone(), config.request_timeout())
    }

    fn build(server_url: String, timeout: Option<std::time::Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(BUILD_INFO.user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Check `GET /health`. Never fails; connection problems are `Offline`.
    pub async fn health(&self) -> HealthStatus {
        let res = match self
            .http
            .get(format!("{}/health", self.server_url))
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => return HealthStatus::Offline(e.to_string()),
        };

        let status = res.status();
        match res.json::<HealthResponse>().await {
            Ok(body) if status.is_success() && body.is_ok() => HealthStatus::Online,
            Ok(body) => HealthStatus::Degraded(format!("{status} {}", body.status)),
            Err(e) => HealthStatus::Degraded(format!("{status}: {e}")),
        }
    }
}

#[async_trait]
impl QueryTransport for HttpClient {
    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let res = self
            .http
            .post(format!("{}/query", self.server_url))
            .json(request)
            .send()
            .await?;

        // The status code is not inspected: the body decides.
        let status = res.status();
        let body = res.bytes().await?;
        debug!(%status, bytes = body.len(), "query response received");

        QueryResponse::from_slice(&body)
            .map_err(|e| Error::Transport(format!("unreadable response ({status}): {e}")))
    }
}
