use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use secrecy::Secret;
use serde::Deserialize;
use shared::protocol::UPLOAD_PAGE_PATH;
use url::Url;

use crate::credentials::CredentialContext;

pub const DEFAULT_SETTINGS_FILE: &str = "doclist.toml";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub bucket_host: String,
    pub upload_url: String,
    pub session_cookie: Option<Secret<String>>,
    pub bearer_token: Option<Secret<String>>,
    /// `None` means requests never time out.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            bucket_host: "s3-eddi-lsh-bucket.s3.ap-northeast-2.amazonaws.com".into(),
            upload_url: format!("http://localhost:3000{UPLOAD_PAGE_PATH}"),
            session_cookie: None,
            bearer_token: None,
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    bucket_host: Option<String>,
    upload_url: Option<String>,
    session_cookie: Option<String>,
    bearer_token: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn credentials(&self) -> CredentialContext {
        use secrecy::ExposeSecret;

        let mut credentials = CredentialContext::anonymous();
        if let Some(cookie) = &self.session_cookie {
            credentials = credentials.with_session_cookie(cookie.expose_secret().clone());
        }
        if let Some(token) = &self.bearer_token {
            credentials = credentials.with_bearer_token(token.expose_secret().clone());
        }
        credentials
    }

    pub fn set_session_cookie(&mut self, cookie: String) {
        self.session_cookie = Some(Secret::new(cookie));
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let parsed = Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api base url '{}'", self.api_base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api base url '{}' must use http or https",
                self.api_base_url
            );
        }
        if self.bucket_host.trim().is_empty() {
            bail!("bucket host must not be empty");
        }
        Ok(())
    }

    fn merge_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file_cfg.bucket_host {
            self.bucket_host = v;
        }
        if let Some(v) = file_cfg.upload_url {
            self.upload_url = v;
        }
        if let Some(v) = file_cfg.session_cookie {
            self.session_cookie = Some(Secret::new(v));
        }
        if let Some(v) = file_cfg.bearer_token {
            self.bearer_token = Some(Secret::new(v));
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout = timeout_from_secs(v);
        }
    }

    /// Applies environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        if let Some(v) = var(&["APP__API_BASE_URL", "DOCLIST_API_BASE_URL"]) {
            self.api_base_url = v;
        }
        if let Some(v) = var(&["APP__BUCKET_HOST", "DOCLIST_BUCKET_HOST"]) {
            self.bucket_host = v;
        }
        if let Some(v) = var(&["APP__UPLOAD_URL", "DOCLIST_UPLOAD_URL"]) {
            self.upload_url = v;
        }
        if let Some(v) = var(&["APP__SESSION_COOKIE", "DOCLIST_SESSION_COOKIE"]) {
            self.session_cookie = Some(Secret::new(v));
        }
        if let Some(v) = var(&["APP__BEARER_TOKEN", "DOCLIST_BEARER_TOKEN"]) {
            self.bearer_token = Some(Secret::new(v));
        }
        if let Some(v) = var(&["APP__REQUEST_TIMEOUT_SECS", "DOCLIST_REQUEST_TIMEOUT_SECS"]) {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.request_timeout = timeout_from_secs(parsed),
                Err(err) => tracing::warn!(value = %v, "ignoring invalid request timeout: {err}"),
            }
        }
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Loads settings: defaults, then the settings file, then environment.
///
/// An explicit `path` must exist; without one, `doclist.toml` in the working
/// directory is read when present. Callers apply their own overrides and
/// then call [`ClientSettings::validate`].
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_SETTINGS_FILE).ok(),
    };

    if let Some(raw) = raw {
        let file_cfg: FileSettings =
            toml::from_str(&raw).context("failed to parse settings file")?;
        settings.merge_file(file_cfg);
    }

    settings.apply_env_overrides(|name| std::env::var(name).ok());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
