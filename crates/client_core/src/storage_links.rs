/// Builds public retrieval links for objects in the document bucket.
/// Links are only formatted here, never fetched or validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLinks {
    host: String,
}

impl StorageLinks {
    pub fn new(bucket_host: &str) -> Self {
        let host = bucket_host
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        Self {
            host: host.to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url_for(&self, s3_key: &str) -> String {
        format!("https://{}/{}", self.host, s3_key)
    }
}
