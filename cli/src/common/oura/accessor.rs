//! # Provider Data Accessor
//!
//! File: cli/src/common/oura/accessor.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `DataAccessor` issues an authenticated GET for one provider collection,
//! takes the first record of the returned `data` list, prunes it with
//! `common::sanitize`, and hands it back as a JSON string.
//!
//! There are two layers:
//! - `fetch_record` / `fetch_sanitized` return `Result<_, PulseError>` and are used
//!   where an operator wants to see the failure (`pulsebot fetch --strict`).
//! - `prompt_value` / `prompt_values` never fail. Any `TransportFailure` or
//!   `NoRecordAvailable` is logged and replaced by the literal `{}` so a prompt
//!   can always be rendered.
//!
//! No timeout, retry or caching is applied; each call is a single request.
//!
//! ## Examples
//!
//! ```rust
//! let accessor = DataAccessor::new(ProviderSettings::new("https://api.ouraring.com", token))?;
//! let sleep = accessor.prompt_value(Resource::DailySleep).await; // e.g. {"score":88,...} or {}
//! ```
//!
use super::resource::Resource;
use crate::common::sanitize;
use crate::core::config::ProviderConfig;
use crate::core::error::PulseError;
use futures_util::future::join_all;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info, warn};

/// Value handed to prompts whenever a record could not be produced.
pub const EMPTY_RECORD: &str = "{}";

/// Explicit provider configuration handed to `DataAccessor::new`.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_base: String,
    pub access_token: String,
}

impl ProviderSettings {
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            access_token: access_token.into(),
        }
    }

    /// Builds settings from the loaded configuration. Fails when no token is configured.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, PulseError> {
        let token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                PulseError::Config(
                    "No provider access token configured. Set SECRET_OURA_API_KEY or provider.access_token."
                        .to_string(),
                )
            })?;
        Ok(Self::new(config.api_base.clone(), token))
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_base", &self.api_base)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Authenticated reader for the provider's daily collections.
#[derive(Debug, Clone)]
pub struct DataAccessor {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl DataAccessor {
    pub fn new(settings: ProviderSettings) -> Result<Self, PulseError> {
        if settings.access_token.trim().is_empty() {
            return Err(PulseError::Config(
                "Provider access token cannot be empty.".to_string(),
            ));
        }
        if !(settings.api_base.starts_with("https://") || settings.api_base.starts_with("http://"))
        {
            return Err(PulseError::Config(format!(
                "Invalid provider api_base '{}'. Expected an http:// or https:// URL.",
                settings.api_base
            )));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("pulsebot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PulseError::Config(format!("Failed to build HTTP client: {}", e)))?;
        debug!("Created provider accessor for {}", settings.api_base);
        Ok(Self { settings, client })
    }

    pub fn resource_url(&self, resource: Resource) -> String {
        format!(
            "{}/v2/usercollection/{}",
            self.settings.api_base.trim_end_matches('/'),
            resource.path_segment()
        )
    }

    /// # Fetch Record (`fetch_record`)
    ///
    /// Returns `data[0]` of the collection, unmodified.
    ///
    /// ## Errors
    ///
    /// * `PulseError::TransportFailure` if the request fails, the status is not 2xx,
    ///   or the body is not JSON.
    /// * `PulseError::NoRecordAvailable` if `data` is missing, not a list, empty,
    ///   or its first element is not an object.
    pub async fn fetch_record(&self, resource: Resource) -> Result<Map<String, Value>, PulseError> {
        let url = self.resource_url(resource);
        debug!("Requesting {}", url);

        let transport = |source: reqwest::Error| PulseError::TransportFailure {
            resource: resource.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.settings.access_token)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        let body: Value = response.json().await.map_err(transport)?;

        first_record(resource, body)
    }

    /// Fetches the first record and strips it down to numbers, booleans and nested objects.
    pub async fn fetch_sanitized(
        &self,
        resource: Resource,
    ) -> Result<Map<String, Value>, PulseError> {
        let mut record = self.fetch_record(resource).await?;
        sanitize::strip_text_and_lists(&mut record);
        debug_assert!(sanitize::is_sanitized(&record));
        Ok(record)
    }

    /// # Prompt Value (`prompt_value`)
    ///
    /// The sanitized record as a JSON string, or `{}` if anything went wrong.
    /// Failures are logged at `warn` and never returned.
    pub async fn prompt_value(&self, resource: Resource) -> String {
        match self.fetch_sanitized(resource).await {
            Ok(record) => match serde_json::to_string(&record) {
                Ok(json) => {
                    info!("Fetched {} ({} bytes after sanitizing)", resource, json.len());
                    json
                }
                Err(e) => {
                    warn!("Failed to serialize {} record: {}", resource, e);
                    EMPTY_RECORD.to_string()
                }
            },
            Err(e) => {
                warn!("Falling back to an empty record: {}", e);
                EMPTY_RECORD.to_string()
            }
        }
    }

    /// `prompt_value` for every resource, fetched concurrently, in `Resource::ALL` order.
    pub async fn prompt_values(&self) -> Vec<(Resource, String)> {
        join_all(
            Resource::ALL
                .into_iter()
                .map(|resource| async move { (resource, self.prompt_value(resource).await) }),
        )
        .await
    }
}

fn first_record(resource: Resource, body: Value) -> Result<Map<String, Value>, PulseError> {
    let no_record = |reason: &str| PulseError::NoRecordAvailable {
        resource: resource.to_string(),
        reason: reason.to_string(),
    };

    let Value::Object(mut envelope) = body else {
        return Err(no_record("response body is not a JSON object"));
    };
    match envelope.remove("data") {
        None => Err(no_record("response has no 'data' field")),
        Some(Value::Array(records)) => match records.into_iter().next() {
            None => Err(no_record("'data' is empty")),
            Some(Value::Object(record)) => Ok(record),
            Some(_) => Err(no_record("first element of 'data' is not an object")),
        },
        Some(_) => Err(no_record("'data' is not a list")),
    }
}
