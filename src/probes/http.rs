//! HTTP GET probe.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use futures_util::future::BoxFuture;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;
use url::Url;

use crate::checker::{Checker, ProbeOutcome};
use crate::probes::ProbeError;

/// Succeeds when `GET url` answers with the expected status
/// (any 2xx when none is configured).
#[derive(Debug, Clone)]
pub struct HttpCheck {
    destination: SocketAddr,
    /// Pre-calculated probe URL.
    url: Url,
    expected_status: Option<u16>,
    timeout: Duration,
    client: Client<HttpConnector, Body>,
}

impl HttpCheck {
    pub fn new(
        destination: SocketAddr,
        path: &str,
        expected_status: Option<u16>,
        timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let base = Url::parse(&format!("http://{}", destination))?;
        let url = base.join(path)?;
        if url.origin() != base.origin() {
            return Err(ProbeError::ForeignPath(path.to_string()));
        }
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            destination,
            url,
            expected_status,
            timeout,
            client,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn status_ok(&self, status: u16) -> bool {
        match self.expected_status {
            Some(expected) => status == expected,
            None => (200..300).contains(&status),
        }
    }

    async fn fetch(&self) -> Result<(), ProbeError> {
        let request = Request::builder()
            .method("GET")
            .uri(self.url.as_str())
            .header("user-agent", "checkerd-health-check")
            .body(Body::empty())
            .map_err(|e| ProbeError::Connect(e.to_string()))?;

        let response = match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(ProbeError::Connect(e.to_string())),
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
        };

        let status = response.status().as_u16();
        if self.status_ok(status) {
            Ok(())
        } else {
            Err(ProbeError::Status {
                actual: status,
                expected: self
                    .expected_status
                    .map_or_else(|| "2xx".to_string(), |s| s.to_string()),
            })
        }
    }
}

impl Checker for HttpCheck {
    fn kind(&self) -> &'static str {
        "http"
    }

    fn probe(&self) -> BoxFuture<'_, ProbeOutcome> {
        Box::pin(async move {
            match self.fetch().await {
                Ok(()) => ProbeOutcome::Success,
                Err(e) => {
                    tracing::warn!(url = %self.url, error = %e, "HTTP check failed");
                    ProbeOutcome::Failure(e.to_string())
                }
            }
        })
    }

    fn describe(&self) -> Vec<String> {
        let mut lines = vec![
            "   Keepalive method = HTTP_GET".to_string(),
            format!("   Connection dest = {}", self.destination),
            format!("   Url = {}", self.url),
        ];
        if let Some(status) = self.expected_status {
            lines.push(format!("   Status code = {}", status));
        }
        lines.push(format!("   Connection timeout = {}", self.timeout.as_secs()));
        lines
    }
}
