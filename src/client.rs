//! Portal HTTP client
//!
//! [`PortalBackend`] is the seam between the wizard state machine and
//! the network: the wizard only ever talks to this trait, so tests can
//! drive the state machine with scripted backends while the binaries
//! use [`PortalClient`] against the portal server.

use crate::attestation::AttestationRecord;
use crate::error::PortalError;
use crate::qualification::{QualificationResult, QualifyRequest};
use crate::types::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operations the registration wizard needs from the portal
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// Whether `address` is in the eligibility snapshot
    async fn wallet_eligibility(&self, address: &Address) -> Result<bool, PortalError>;

    /// Submit a qualification request for the user
    async fn submit_qualification(
        &self,
        request: &QualifyRequest,
    ) -> Result<QualificationResult, PortalError>;

    /// Issue the citizenship attestation after a READY qualification.
    /// Takes the same payload as qualification: the portal re-qualifies
    /// at issue time.
    async fn issue_attestation(
        &self,
        request: &QualifyRequest,
    ) -> Result<AttestationRecord, PortalError>;
}

/// Wire format of `GET /api/v1/eligibility/{address}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub address: Address,
    pub eligible: bool,
}

/// HTTP implementation of [`PortalBackend`] against the portal server
pub struct PortalClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl PortalClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(
            base_url,
            Duration::from_secs(crate::config::DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a citizen's attestation record
    pub async fn get_citizen(&self, user_id: &str) -> Result<AttestationRecord, PortalError> {
        let resp = self
            .client
            .get(format!("{}/api/v1/citizens/{}", self.base_url, user_id))
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, PortalError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(PortalError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl PortalBackend for PortalClient {
    async fn wallet_eligibility(&self, address: &Address) -> Result<bool, PortalError> {
        let resp = self
            .client
            .get(format!(
                "{}/api/v1/eligibility/{}",
                self.base_url, address
            ))
            .timeout(self.timeout)
            .send()
            .await?;
        let body: EligibilityResponse = Self::decode(resp).await?;
        Ok(body.eligible)
    }

    async fn submit_qualification(
        &self,
        request: &QualifyRequest,
    ) -> Result<QualificationResult, PortalError> {
        let resp = self
            .client
            .post(format!("{}/api/v1/citizenship/qualify", self.base_url))
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn issue_attestation(
        &self,
        request: &QualifyRequest,
    ) -> Result<AttestationRecord, PortalError> {
        let resp = self
            .client
            .post(format!("{}/api/v1/citizenship/register", self.base_url))
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualification::QualificationStatus;
    use crate::types::SocialIdentity;
    use httpmock::prelude::*;

    fn addr() -> Address {
        Address::new("0xabcdef0123456789abcdef0123456789abcdef01")
    }

    #[tokio::test]
    async fn test_wallet_eligibility() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("/api/v1/eligibility/{}", addr()));
            then.status(200)
                .json_body(serde_json::json!({ "address": addr().as_str(), "eligible": true }));
        });

        let client = PortalClient::new(&server.base_url());
        let eligible = client.wallet_eligibility(&addr()).await.unwrap();
        assert!(eligible);
        mock.assert();
    }

    #[tokio::test]
    async fn test_submit_qualification_decodes_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/citizenship/qualify");
            then.status(200).json_body(serde_json::json!({
                "status": "PRIORITY_REQUIRED",
                "message": "priority window is active",
                "trust": {
                    "social_verification": 30,
                    "wallet_eligibility": 40,
                    "governance_participation": 0
                }
            }));
        });

        let client = PortalClient::new(&server.base_url());
        let request = QualifyRequest {
            user_id: "user-1".to_string(),
            governance_address: addr(),
            wallets: vec![addr()],
            socials: vec![SocialIdentity::verified(
                crate::types::SocialProvider::Farcaster,
                "alice",
            )],
        };
        let result = client.submit_qualification(&request).await.unwrap();
        assert_eq!(result.status, QualificationStatus::PriorityRequired);
        assert_eq!(result.trust.total(), 70);
    }

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path_contains("/api/v1/citizens/");
            then.status(404).body("citizen not found: user-9");
        });

        let client = PortalClient::new(&server.base_url());
        let err = client.get_citizen("user-9").await.unwrap_err();
        match err {
            PortalError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("user-9"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
