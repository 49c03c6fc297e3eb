//! Portal error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("portal returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("registration window is closed")]
    RegistrationClosed,

    #[error("user {0} is not qualified to register")]
    NotQualified(String),

    #[error("citizen not found: {0}")]
    CitizenNotFound(String),

    #[error("config error: {0}")]
    Config(String),
}

impl PortalError {
    /// Status code the portal server maps this error to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http(_) => 502,
            Self::Api { status, .. } => *status,
            Self::InvalidAddress(_) => 400,
            Self::RegistrationClosed => 403,
            Self::NotQualified(_) => 409,
            Self::CitizenNotFound(_) => 404,
            Self::Config(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PortalError::InvalidAddress("x".into()).status_code(), 400);
        assert_eq!(PortalError::RegistrationClosed.status_code(), 403);
        assert_eq!(PortalError::NotQualified("u".into()).status_code(), 409);
        assert_eq!(PortalError::CitizenNotFound("u".into()).status_code(), 404);
    }
}
