//! HTTP clients for the store endpoint and the generation webhook
//!
//! Every call is a single request; failures are reported once and never
//! retried.

use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use autoblog_core::{Article, Config, NewArticle};

/// Request timeout in seconds
const REQUEST_TIMEOUT: u64 = 30;

/// Message shown when a generation request fails
pub const GENERATE_FAILED: &str = "Failed to generate article";

/// Message shown when fetching the latest article fails
pub const FETCH_FAILED: &str = "Failed to fetch article";

/// Message shown when publishing an article fails
pub const PUBLISH_FAILED: &str = "Failed to publish article";

/// Errors from talking to the store or the webhook
#[derive(Error, Debug)]
pub enum ClientError {
    /// Keyword was blank after trimming
    #[error("Please enter a keyword")]
    EmptyKeyword,

    /// No webhook configured
    #[error(
        "Webhook URL not configured. Set it with:\n  autoblog config set webhook_url <url>"
    )]
    WebhookNotConfigured,

    /// Request never got a response
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Response had a non-success status
    #[error("{context} (HTTP {status}){}", format_detail(.detail))]
    Status {
        context: &'static str,
        status: StatusCode,
        detail: Option<String>,
    },

    /// Response body didn't have the expected shape
    #[error("{context}: unexpected response: {details}")]
    Decode {
        context: &'static str,
        details: String,
    },
}

fn format_detail(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT))
        .user_agent(concat!("autoblog/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Ask the automation webhook to generate an article for `keyword`
///
/// The keyword is trimmed; a blank keyword is rejected without a request.
pub async fn request_generation(webhook_url: &str, keyword: &str) -> Result<(), ClientError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ClientError::EmptyKeyword);
    }

    debug!(%webhook_url, %keyword, "requesting generation");
    let response = http_client()
        .post(webhook_url)
        .json(&json!({ "keyword": keyword }))
        .send()
        .await
        .map_err(|source| ClientError::Transport {
            context: GENERATE_FAILED,
            source,
        })?;

    if !response.status().is_success() {
        return Err(status_error(GENERATE_FAILED, response).await);
    }

    Ok(())
}

/// Body of a successful store write
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: Uuid,
}

/// Client for the article store endpoint
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    articles_url: String,
    access_key: Option<String>,
}

impl StoreClient {
    pub fn new(articles_url: impl Into<String>, access_key: Option<String>) -> Self {
        Self {
            http: http_client(),
            articles_url: articles_url.into(),
            access_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.articles_url(), config.access_key.clone())
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, &self.articles_url)
            .header(header::CONTENT_TYPE, "application/json");

        match &self.access_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Fetch the latest article
    ///
    /// `Ok(None)` means the store holds no article yet.
    pub async fn latest(&self) -> Result<Option<Article>, ClientError> {
        let response = self
            .request(reqwest::Method::GET)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                context: FETCH_FAILED,
                source,
            })?;

        if !response.status().is_success() {
            return Err(status_error(FETCH_FAILED, response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|source| ClientError::Transport {
                context: FETCH_FAILED,
                source,
            })?;

        // An empty store answers with null; anything without an id is
        // treated the same way.
        if body.get("id").map_or(true, Value::is_null) {
            return Ok(None);
        }

        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| ClientError::Decode {
                context: FETCH_FAILED,
                details: e.to_string(),
            })
    }

    /// Store an article, returning the identifier the store assigned
    pub async fn publish(&self, article: &NewArticle) -> Result<Uuid, ClientError> {
        let response = self
            .request(reqwest::Method::POST)
            .json(article)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                context: PUBLISH_FAILED,
                source,
            })?;

        if !response.status().is_success() {
            return Err(status_error(PUBLISH_FAILED, response).await);
        }

        let created: CreatedResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::Decode {
                    context: PUBLISH_FAILED,
                    details: e.to_string(),
                })?;

        Ok(created.id)
    }
}

/// Build a status error, pulling `{"error": ...}` out of the body if present
async fn status_error(context: &'static str, response: reqwest::Response) -> ClientError {
    let status = response.status();
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string));

    ClientError::Status {
        context,
        status,
        detail,
    }
}
