//! Blocking HTTP client for the Notion API.

use std::fmt;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::DocumentStore;
use crate::error::{Error, Result};
use crate::model::{BlockList, Page};

/// Public Notion API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// API version sent in the `Notion-Version` header.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Largest page size the API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Connection settings for [`NotionClient`].
#[derive(Clone)]
pub struct NotionConfig {
    /// Integration token
    token: String,

    /// Base URL (overridable for testing)
    base_url: String,

    /// Value of the `Notion-Version` header
    notion_version: String,

    /// Results requested per listing call
    page_size: u32,
}

impl NotionConfig {
    /// Create a configuration for the given integration token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `NOTION_TOKEN`
    /// - `NOTION_BASE_URL` (optional)
    /// - `NOTION_VERSION` (optional)
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("NOTION_TOKEN")
            .map_err(|_| Error::Config("NOTION_TOKEN is not set".to_string()))?;
        let mut config = Self::new(token);
        if let Ok(url) = std::env::var("NOTION_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(version) = std::env::var("NOTION_VERSION") {
            config = config.with_notion_version(version);
        }
        Ok(config)
    }

    /// Set a custom API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API version header.
    pub fn with_notion_version(mut self, version: impl Into<String>) -> Self {
        self.notion_version = version.into();
        self
    }

    /// Set the listing page size (clamped to 1..=100).
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the listing page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("notion_version", &self.notion_version)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// [`DocumentStore`] backed by the Notion REST API.
#[derive(Debug)]
pub struct NotionClient {
    config: NotionConfig,
    http: Client,
}

impl NotionClient {
    /// Create a client with the given configuration.
    pub fn new(config: NotionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| Error::Config("token contains invalid header characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "Notion-Version",
            HeaderValue::from_str(&config.notion_version)
                .map_err(|_| Error::Config(format!("invalid Notion-Version: {}", config.notion_version)))?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("unnotion/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, http })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json()?);
        }

        let body = response.text().unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => (err.code, err.message),
            Err(_) => ("unknown".to_string(), body),
        };
        Err(Error::api(status.as_u16(), code, message))
    }
}

impl DocumentStore for NotionClient {
    fn list_children(&self, container_id: &str, cursor: Option<&str>) -> Result<BlockList> {
        debug!(
            "GET blocks/{}/children (cursor: {})",
            container_id,
            cursor.unwrap_or("-")
        );
        let mut request = self
            .http
            .get(self.url(&format!("blocks/{}/children", container_id)))
            .query(&[("page_size", self.config.page_size.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }
        self.send(request)
    }

    fn get_page(&self, page_id: &str) -> Result<Page> {
        debug!("GET pages/{}", page_id);
        self.send(self.http.get(self.url(&format!("pages/{}", page_id))))
    }
}
