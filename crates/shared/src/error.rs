use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Internal,
    Other,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 422 => Self::Validation,
            429 => Self::RateLimited,
            500..=599 => Self::Internal,
            _ => Self::Other,
        }
    }
}

/// Non-success response from the document backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?} (HTTP {status}){}", detail_suffix(.detail))]
pub struct ApiError {
    pub status: u16,
    pub code: ErrorCode,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self {
            status,
            code: ErrorCode::from_status(status),
            detail,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(ErrorCode::from_status(401), ErrorCode::Unauthorized);
        assert_eq!(ErrorCode::from_status(422), ErrorCode::Validation);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::Internal);
        assert_eq!(ErrorCode::from_status(418), ErrorCode::Other);
    }

    #[test]
    fn display_includes_detail_when_present() {
        let err = ApiError::new(500, Some("db down".into()));
        assert_eq!(err.to_string(), "Internal (HTTP 500): db down");
        assert_eq!(ApiError::new(404, None).to_string(), "NotFound (HTTP 404)");
    }
}
