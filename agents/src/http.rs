//! HTTP adapter: a `VerificationAgent` backed by a remote agency endpoint.
//!
//! One instance per configured endpoint. The adapter owns wire concerns only
//! (request serialization, status mapping, response validation); timeouts and
//! retries belong to the resilience wrapper.

use crate::agent::{AgentError, HealthStatus, VerificationAgent};
use async_trait::async_trait;
use credence_types::{AgentId, AgentResult, VerificationRequest};
use serde::Deserialize;

/// Wire shape of an agency health endpoint.
#[derive(Debug, Deserialize)]
struct HealthBody {
    healthy: bool,
    #[serde(default)]
    detail: Option<String>,
}

/// Remote verification agent reached over HTTP.
///
/// `POST {base}/verify` with the request body, `GET {base}/health` for
/// liveness.
pub struct HttpAgent {
    id: AgentId,
    base_url: String,
    client: reqwest::Client,
}

impl HttpAgent {
    pub fn new(id: AgentId, base_url: &str) -> Self {
        Self::with_client(id, base_url, reqwest::Client::new())
    }

    /// Build with a shared client so all agents reuse one connection pool.
    pub fn with_client(id: AgentId, base_url: &str, client: reqwest::Client) -> Self {
        Self {
            id,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl VerificationAgent for HttpAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<AgentResult, AgentError> {
        let url = format!("{}/verify", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AgentError::Status {
                status: resp.status().as_u16(),
            });
        }

        let mut result: AgentResult = resp
            .json()
            .await
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;

        result
            .validate()
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;

        // The agency name on the result is ours to assign; remote payloads
        // do not get to impersonate another source.
        result.agent = self.id.display_name();
        Ok(result)
    }

    async fn health_check(&self) -> HealthStatus {
        let url = format!("{}/health", self.base_url);
        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => return HealthStatus::unhealthy(e.to_string()),
        };

        if !resp.status().is_success() {
            return HealthStatus::unhealthy(format!("status {}", resp.status().as_u16()));
        }

        match resp.json::<HealthBody>().await {
            Ok(body) if body.healthy => HealthStatus::healthy(),
            Ok(body) => {
                HealthStatus::unhealthy(body.detail.unwrap_or_else(|| "not healthy".to_string()))
            }
            Err(e) => HealthStatus::unhealthy(format!("malformed health body: {e}")),
        }
    }
}
