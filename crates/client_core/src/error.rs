use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to document backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Message shown to the user: the server-supplied detail when there is one,
    /// otherwise `fallback`. Transport and decode failures always fall back.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(ApiError {
                detail: Some(detail),
                ..
            }) => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
