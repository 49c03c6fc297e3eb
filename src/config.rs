//! Portal Configuration
//!
//! Defines the configuration for the citizen portal including:
//! - Registration and priority-access windows
//! - Trust score weights and qualification threshold
//! - Wizard pacing (attestation delay, request timeout)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between a READY result and attestation issuing, in ms.
/// Carried over from the original flow; kept configurable because the
/// reason for the pause (cosmetic pacing vs. backend propagation) is
/// undocumented.
pub const DEFAULT_ATTESTATION_DELAY_MS: u64 = 5_000;

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default qualification threshold (out of 100 trust points)
pub const DEFAULT_QUALIFICATION_THRESHOLD: u32 = 50;

/// Complete portal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub trust: TrustConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
}

impl PortalConfig {
    /// Parse a TOML configuration document
    pub fn from_toml_str(raw: &str) -> Result<Self, crate::error::PortalError> {
        toml::from_str(raw).map_err(|e| crate::error::PortalError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&raw)?)
    }
}

/// Registration window configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Window open time; `None` means open since forever
    pub opens_at: Option<DateTime<Utc>>,
    /// Window close time; `None` means no scheduled close
    pub closes_at: Option<DateTime<Utc>>,
    /// Until this time only priority-access users may register
    pub priority_until: Option<DateTime<Utc>>,
}

impl RegistrationConfig {
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        if let Some(opens) = self.opens_at {
            if now < opens {
                return false;
            }
        }
        if let Some(closes) = self.closes_at {
            if now >= closes {
                return false;
            }
        }
        true
    }

    pub fn in_priority_window(&self, now: DateTime<Utc>) -> bool {
        matches!(self.priority_until, Some(until) if now < until)
    }
}

/// Trust score weights. The three signals sum to 100 by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Points for having at least one verified social identity
    pub social_weight: u32,
    /// Points for holding a wallet in the eligibility snapshot
    pub wallet_weight: u32,
    /// Points for prior governance participation
    pub participation_weight: u32,
    /// Minimum total score required to qualify
    pub qualification_threshold: u32,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            social_weight: 30,
            wallet_weight: 40,
            participation_weight: 30,
            qualification_threshold: DEFAULT_QUALIFICATION_THRESHOLD,
        }
    }
}

/// Wizard pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Pause between a READY result and the attestation call, in ms
    pub attestation_delay_ms: u64,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            attestation_delay_ms: DEFAULT_ATTESTATION_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl WizardConfig {
    pub fn attestation_delay(&self) -> Duration {
        Duration::from_millis(self.attestation_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Config with no pacing delay, for tests and local development
    pub fn immediate() -> Self {
        Self {
            attestation_delay_ms: 0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_registration_window() {
        let config = RegistrationConfig {
            opens_at: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            closes_at: Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()),
            priority_until: Some(Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap()),
        };

        let before = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let priority = Utc.with_ymd_and_hms(2026, 1, 3, 0, 0, 0).unwrap();
        let open = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

        assert!(!config.is_open(before));
        assert!(config.is_open(priority));
        assert!(config.in_priority_window(priority));
        assert!(config.is_open(open));
        assert!(!config.in_priority_window(open));
        assert!(!config.is_open(after));
    }

    #[test]
    fn test_unbounded_window_is_open() {
        let config = RegistrationConfig::default();
        assert!(config.is_open(Utc::now()));
        assert!(!config.in_priority_window(Utc::now()));
    }

    #[test]
    fn test_default_trust_weights_sum_to_100() {
        let trust = TrustConfig::default();
        assert_eq!(
            trust.social_weight + trust.wallet_weight + trust.participation_weight,
            100
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let raw = r#"
            [trust]
            social_weight = 20
            wallet_weight = 50
            participation_weight = 30
            qualification_threshold = 60

            [wizard]
            attestation_delay_ms = 0
            request_timeout_secs = 10
        "#;
        let config = PortalConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.trust.qualification_threshold, 60);
        assert_eq!(config.wizard.attestation_delay_ms, 0);
        assert!(config.registration.opens_at.is_none());
    }
}
