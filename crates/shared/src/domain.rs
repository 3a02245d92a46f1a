use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(DocumentId);
id_newtype!(UserId);

/// Document record as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: DocumentId,
    pub file_name: String,
    /// Object-storage key; combined with the bucket host to form the open link.
    pub s3_key: String,
    pub uploader_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_meta_uses_plain_integer_ids_on_the_wire() {
        let raw = r#"{"id":1,"file_name":"a.pdf","s3_key":"k1","uploader_id":7}"#;
        let doc: DocumentMeta = serde_json::from_str(raw).expect("decode");
        assert_eq!(doc.id, DocumentId(1));
        assert_eq!(doc.uploader_id, UserId(7));
        assert_eq!(doc.s3_key, "k1");

        let encoded = serde_json::to_value(&doc).expect("encode");
        assert_eq!(encoded["id"], serde_json::json!(1));
    }

    #[test]
    fn ids_display_as_bare_numbers() {
        assert_eq!(DocumentId(42).to_string(), "42");
    }
}
