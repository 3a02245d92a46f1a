use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{DocumentId, DocumentMeta},
    error::ApiError,
    protocol::{analyze_document_path, ErrorBody, LIST_DOCUMENTS_PATH},
};
use tracing::{debug, warn};

pub mod config;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod page;
pub mod storage_links;

pub use config::{load_settings, ClientSettings};
pub use controller::{
    Notification, Notifier, TracingNotifier, ViewEvent, ViewState, ViewStateController,
    ANALYZE_FALLBACK_MESSAGE, LIST_FALLBACK_MESSAGE,
};
pub use credentials::CredentialContext;
pub use error::ClientError;
pub use page::{DocumentCard, PageView};
pub use storage_links::StorageLinks;

/// Remote document backend.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentMeta>, ClientError>;
    /// Starts server-side analysis. Any success body is ignored.
    async fn analyze_document(&self, id: DocumentId) -> Result<(), ClientError>;
}

pub struct HttpDocumentClient {
    http: Client,
    base_url: String,
    credentials: CredentialContext,
}

impl HttpDocumentClient {
    pub fn new(base_url: impl Into<String>, credentials: CredentialContext) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url.into()),
            credentials,
        }
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: CredentialContext,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: normalize_base_url(base_url.into()),
            credentials,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::with_timeout(
            settings.api_base_url.clone(),
            settings.credentials(),
            settings.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn ensure_success(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = match response.bytes().await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(status = status.as_u16(), "failed to read error body: {err}");
                Default::default()
            }
        };
        let detail = ErrorBody::from_bytes(&raw).detail_message();
        Err(ApiError::new(status.as_u16(), detail).into())
    }
}

fn normalize_base_url(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[async_trait]
impl DocumentApi for HttpDocumentClient {
    async fn list_documents(&self) -> Result<Vec<DocumentMeta>, ClientError> {
        let response = self
            .credentials
            .apply(self.http.get(self.url(LIST_DOCUMENTS_PATH)))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let raw = response.bytes().await?;
        let documents: Vec<DocumentMeta> = serde_json::from_slice(&raw)?;
        debug!(count = documents.len(), "decoded document list");
        Ok(documents)
    }

    async fn analyze_document(&self, id: DocumentId) -> Result<(), ClientError> {
        let response = self
            .credentials
            .apply(self.http.post(self.url(&analyze_document_path(id))))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
