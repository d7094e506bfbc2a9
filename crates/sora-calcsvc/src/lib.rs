//! # sora-calcsvc — Calculation Service Client
//!
//! HTTP transport for the external SAIL calculation service. The wire
//! contract and all interpretation rules (Category C short-circuit, the
//! 2.5 OSO-count trust rule) live in `sora-engine::remote`; this crate
//! only moves bytes, with bounded exponential backoff on transport
//! errors.
//!
//! Retry/backoff around the boundary belongs here, in calling
//! infrastructure — never in the decision logic.

mod retry;

use url::Url;

use sora_engine::{SailComputationRequest, SailComputationResponse};

use crate::retry::retry_send;

/// Errors from the calculation service boundary.
#[derive(Debug, thiserror::Error)]
pub enum CalcServiceError {
    /// The configured base URL is not a valid URL.
    #[error("invalid calculation service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be delivered (after retries).
    #[error("calculation service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("calculation service returned {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },
}

/// A client for one calculation service deployment.
#[derive(Debug, Clone)]
pub struct CalcServiceClient {
    base_url: Url,
    http: reqwest::Client,
}

impl CalcServiceClient {
    /// Build a client against a base URL (e.g. `http://calcsvc:8000`).
    pub fn new(base_url: &str) -> Result<Self, CalcServiceError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            http: reqwest::Client::new(),
        })
    }

    /// POST a SAIL computation to the service and decode the response.
    ///
    /// Transport failures are retried with backoff; HTTP error statuses
    /// are returned immediately — the caller decides whether a 4xx means
    /// a bad request or an out-of-contract service.
    pub async fn compute_sail(
        &self,
        request: &SailComputationRequest,
    ) -> Result<SailComputationResponse, CalcServiceError> {
        let url = self.base_url.join("api/v1/sail")?;
        let response = retry_send(|| self.http.post(url.clone()).json(request).send()).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "calculation service error response");
            return Err(CalcServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<SailComputationResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(CalcServiceClient::new("not a url").is_err());
        assert!(CalcServiceClient::new("http://localhost:8000").is_ok());
    }

    #[test]
    fn test_endpoint_join() {
        let client = CalcServiceClient::new("http://calcsvc:8000/").unwrap();
        let joined = client.base_url.join("api/v1/sail").unwrap();
        assert_eq!(joined.as_str(), "http://calcsvc:8000/api/v1/sail");
    }
}
