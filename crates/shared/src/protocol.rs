use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DocumentId;

pub const LIST_DOCUMENTS_PATH: &str = "/documents/list";
pub const UPLOAD_PAGE_PATH: &str = "/documents/register";

pub fn analyze_document_path(id: DocumentId) -> String {
    format!("/documents/analyze/{}", id.0)
}

/// Body returned by the backend on non-success responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parses a failure body; anything that isn't a JSON object yields no detail.
    pub fn from_bytes(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }

    /// Human-readable detail. Empty strings and nulls count as absent,
    /// structured values are rendered as compact JSON.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body = ErrorBody::from_bytes(br#"{"detail":"db down"}"#);
        assert_eq!(body.detail_message().as_deref(), Some("db down"));
    }

    #[test]
    fn missing_empty_or_null_detail_is_absent() {
        assert_eq!(ErrorBody::from_bytes(br#"{}"#).detail_message(), None);
        assert_eq!(ErrorBody::from_bytes(br#"{"detail":""}"#).detail_message(), None);
        assert_eq!(ErrorBody::from_bytes(br#"{"detail":null}"#).detail_message(), None);
    }

    #[test]
    fn unparseable_body_has_no_detail() {
        assert_eq!(ErrorBody::from_bytes(b"").detail_message(), None);
        assert_eq!(ErrorBody::from_bytes(b"<html>502</html>").detail_message(), None);
        assert_eq!(ErrorBody::from_bytes(br#""oops""#).detail_message(), None);
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let body = ErrorBody::from_bytes(br#"{"detail":[{"loc":["path","id"],"msg":"bad"}]}"#);
        assert_eq!(
            body.detail_message().as_deref(),
            Some(r#"[{"loc":["path","id"],"msg":"bad"}]"#)
        );
    }

    #[test]
    fn analyze_path_embeds_the_id() {
        assert_eq!(analyze_document_path(DocumentId(12)), "/documents/analyze/12");
    }
}
