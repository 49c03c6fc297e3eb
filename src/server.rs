//! Portal HTTP server
//!
//! Thin axum wrapper over [`CitizenRegistry`]. Routes:
//!
//! - `GET  /health` — liveness + citizen count
//! - `GET  /api/v1/eligibility/{address}` — eligibility snapshot lookup
//! - `POST /api/v1/citizenship/qualify` — qualification verdict
//! - `POST /api/v1/citizenship/register` — re-qualify and issue the attestation
//! - `GET  /api/v1/citizens/{user_id}` — citizen's attestation record
//! - `GET  /api/v1/attestations/{uid}` — attestation lookup by uid

use crate::attestation::AttestationRecord;
use crate::client::EligibilityResponse;
use crate::error::PortalError;
use crate::qualification::{QualificationResult, QualifyRequest};
use crate::registry::CitizenRegistry;
use crate::types::Address;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct PortalServerState {
    registry: RwLock<CitizenRegistry>,
    /// Issued attestations by uid, for lookups without the user id
    attestations: DashMap<String, AttestationRecord>,
}

impl PortalServerState {
    pub fn new(registry: CitizenRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
            attestations: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &RwLock<CitizenRegistry> {
        &self.registry
    }
}

fn error_response(e: PortalError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, e.to_string())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    citizens: usize,
}

async fn health(State(state): State<Arc<PortalServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        citizens: state.registry.read().citizen_count(),
    })
}

async fn eligibility(
    State(state): State<Arc<PortalServerState>>,
    Path(address): Path<String>,
) -> Result<Json<EligibilityResponse>, (StatusCode, String)> {
    let address = Address::parse(&address).map_err(error_response)?;
    let eligible = state.registry.read().wallet_eligible(&address);
    Ok(Json(EligibilityResponse { address, eligible }))
}

async fn qualify(
    State(state): State<Arc<PortalServerState>>,
    Json(request): Json<QualifyRequest>,
) -> Json<QualificationResult> {
    let result = state.registry.read().qualify(&request, Utc::now());
    info!(user = %request.user_id, status = ?result.status, "qualification evaluated");
    Json(result)
}

async fn register(
    State(state): State<Arc<PortalServerState>>,
    Json(request): Json<QualifyRequest>,
) -> Result<Json<AttestationRecord>, (StatusCode, String)> {
    let record = state
        .registry
        .write()
        .register(&request, Utc::now())
        .map_err(error_response)?;
    state
        .attestations
        .insert(record.uid.clone(), record.clone());
    Ok(Json(record))
}

async fn citizen(
    State(state): State<Arc<PortalServerState>>,
    Path(user_id): Path<String>,
) -> Result<Json<AttestationRecord>, (StatusCode, String)> {
    state
        .registry
        .read()
        .citizen(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_response(PortalError::CitizenNotFound(user_id)))
}

async fn attestation(
    State(state): State<Arc<PortalServerState>>,
    Path(uid): Path<String>,
) -> Result<Json<AttestationRecord>, (StatusCode, String)> {
    state
        .attestations
        .get(&uid)
        .map(|r| Json(r.value().clone()))
        .ok_or((StatusCode::NOT_FOUND, format!("attestation not found: {uid}")))
}

pub fn router(state: Arc<PortalServerState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/eligibility/:address", get(eligibility))
        .route("/api/v1/citizenship/qualify", post(qualify))
        .route("/api/v1/citizenship/register", post(register))
        .route("/api/v1/citizens/:user_id", get(citizen))
        .route("/api/v1/attestations/:uid", get(attestation))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(state: Arc<PortalServerState>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    info!("portal server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RegistrationConfig, TrustConfig};
    use crate::qualification::QualificationStatus;
    use crate::types::{SocialIdentity, SocialProvider};

    fn addr_hex(n: u8) -> String {
        format!("0x{:040x}", n)
    }

    fn state_with_eligible_wallet() -> Arc<PortalServerState> {
        let mut registry =
            CitizenRegistry::new(RegistrationConfig::default(), TrustConfig::default());
        registry.add_eligible_wallet(Address::new(addr_hex(1)));
        Arc::new(PortalServerState::new(registry))
    }

    fn qualify_request(user: &str) -> QualifyRequest {
        QualifyRequest {
            user_id: user.to_string(),
            governance_address: Address::new(addr_hex(1)),
            wallets: vec![Address::new(addr_hex(1))],
            socials: vec![SocialIdentity::verified(SocialProvider::Farcaster, "alice")],
        }
    }

    #[tokio::test]
    async fn test_eligibility_route() {
        let state = state_with_eligible_wallet();

        let Json(body) = eligibility(State(state.clone()), Path(addr_hex(1)))
            .await
            .unwrap();
        assert!(body.eligible);

        let Json(body) = eligibility(State(state.clone()), Path(addr_hex(2)))
            .await
            .unwrap();
        assert!(!body.eligible);

        let err = eligibility(State(state), Path("not-an-address".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_qualify_then_register_then_lookup() {
        let state = state_with_eligible_wallet();

        let Json(result) =
            qualify(State(state.clone()), Json(qualify_request("user-1"))).await;
        assert_eq!(result.status, QualificationStatus::Ready);

        let Json(record) = register(State(state.clone()), Json(qualify_request("user-1")))
            .await
            .unwrap();

        let Json(by_user) = citizen(State(state.clone()), Path("user-1".to_string()))
            .await
            .unwrap();
        assert_eq!(by_user.uid, record.uid);

        let Json(by_uid) = attestation(State(state.clone()), Path(record.uid.clone()))
            .await
            .unwrap();
        assert_eq!(by_uid.user_id, "user-1");

        let Json(h) = health(State(state)).await;
        assert_eq!(h.citizens, 1);
    }

    #[tokio::test]
    async fn test_double_register_conflicts() {
        let state = state_with_eligible_wallet();
        register(State(state.clone()), Json(qualify_request("user-1")))
            .await
            .unwrap();
        let err = register(State(state), Json(qualify_request("user-1")))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_citizen_is_404() {
        let state = state_with_eligible_wallet();
        let err = citizen(State(state), Path("nobody".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
