//! HTTP client for the Jira Cloud REST and Agile APIs
//!
//! [`JiraClient`] owns one `reqwest::Client` with basic authentication and a
//! request timeout. It is cheap to clone and safe to share between concurrent
//! tool invocations; nothing in it is mutated after construction.

mod agile;
mod issues;
pub mod models;
mod projects;

use crate::config::JiraConfig;
use crate::{JiraMcpError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

pub use models::*;

/// Query string pairs for a request
pub type Query<'a> = &'a [(&'a str, String)];

/// Thin typed wrapper over the Jira REST API
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    config: Arc<JiraConfig>,
}

impl JiraClient {
    /// Build a client from configuration
    pub fn new(config: JiraConfig) -> Result<Self> {
        let base_url = Url::parse(&config.host)
            .map_err(|e| JiraMcpError::Config(format!("invalid host '{}': {e}", config.host)))?;
        if base_url.cannot_be_a_base() {
            return Err(JiraMcpError::Config(format!(
                "host '{}' cannot be used as a base URL",
                config.host
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .user_agent(concat!("jira-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config: Arc::new(config),
        })
    }

    /// Configuration the client was built from
    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Browser URL for an issue key
    pub fn browse_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{}", self.config.host, issue_key)
    }

    /// Build an absolute URL from path segments and query pairs.
    /// Segments are percent-encoded individually.
    pub fn url(&self, segments: &[&str], query: Query<'_>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| JiraMcpError::Config("host cannot be used as a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Path and query of a URL, used to name the endpoint in errors
    pub fn endpoint_of(url: &Url) -> String {
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<reqwest::Response> {
        tracing::debug!("➡️ {}", endpoint);
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("⬅️ {} {}", status.as_u16(), endpoint);
        Err(JiraMcpError::Api {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: Query<'_>,
    ) -> Result<T> {
        let url = self.url(segments, query)?;
        let endpoint = Self::endpoint_of(&url);
        let response = self.send(self.request(Method::GET, url), &endpoint).await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: Query<'_>,
        body: &B,
    ) -> Result<T> {
        let url = self.url(segments, query)?;
        let endpoint = Self::endpoint_of(&url);
        let request = self.request(Method::POST, url).json(body);
        let response = self.send(request, &endpoint).await?;
        Self::decode(response).await
    }

    /// POST a JSON body to an endpoint that answers with no content
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: Query<'_>,
        body: &B,
    ) -> Result<()> {
        let url = self.url(segments, query)?;
        let endpoint = Self::endpoint_of(&url);
        self.send(self.request(Method::POST, url).json(body), &endpoint)
            .await?;
        Ok(())
    }

    /// PUT a JSON body to an endpoint that answers with no content
    pub async fn put_no_content<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: Query<'_>,
        body: &B,
    ) -> Result<()> {
        let url = self.url(segments, query)?;
        let endpoint = Self::endpoint_of(&url);
        self.send(self.request(Method::PUT, url).json(body), &endpoint)
            .await?;
        Ok(())
    }

    /// GET raw bytes, following redirects
    pub async fn get_bytes(&self, segments: &[&str], query: Query<'_>) -> Result<Vec<u8>> {
        let url = self.url(segments, query)?;
        let endpoint = Self::endpoint_of(&url);
        let response = self.send(self.request(Method::GET, url), &endpoint).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str) -> JiraClient {
        JiraClient::new(JiraConfig::new(host, "dev@example.com", "token")).unwrap()
    }

    #[test]
    fn test_url_encodes_segments_and_query() {
        let client = client("https://example.atlassian.net");
        let url = client
            .url(
                &["rest", "api", "3", "issue", "PROJ 1"],
                &[("fields", "summary,status".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.atlassian.net/rest/api/3/issue/PROJ%201?fields=summary%2Cstatus"
        );
        assert_eq!(
            JiraClient::endpoint_of(&url),
            "/rest/api/3/issue/PROJ%201?fields=summary%2Cstatus"
        );
    }

    #[test]
    fn test_url_keeps_host_path_prefix() {
        let client = client("https://example.com/jira/");
        let url = client.url(&["rest", "api", "3", "myself"], &[]).unwrap();
        assert_eq!(url.path(), "/jira/rest/api/3/myself");
    }

    #[test]
    fn test_browse_url() {
        let client = client("example.atlassian.net");
        assert_eq!(
            client.browse_url("PROJ-7"),
            "https://example.atlassian.net/browse/PROJ-7"
        );
    }
}
