// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! A thin REST client over `reqwest` for the two endpoints the pipeline
//! needs: a repository README and repository metadata. Every request carries
//! `Accept: application/vnd.github.v3+json` and `Authorization: token ...`.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::GitHubConfig;
use crate::enrich::RepoMetadataSource;
use crate::error::{Resource, RiceRankError};
use crate::record::{RepoMetadata, RepoRef};

pub mod ratelimit;

use ratelimit::RateLimitStatus;

/// Media type requested from the REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Parses an owner/repo string to extract owner and repo.
///
/// Validates format: exactly one `/`, non-empty parts.
///
/// # Errors
///
/// Returns `RiceRankError::Config` if the format is invalid.
pub fn parse_owner_repo(s: &str) -> crate::Result<(String, String)> {
    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(RiceRankError::Config {
            message: format!("Invalid owner/repo format. Expected: owner/repo, got: {s}"),
        });
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Body of `GET /repos/{owner}/{name}/readme`.
#[derive(Debug, Deserialize)]
struct ReadmePayload {
    content: Option<String>,
}

/// Decodes the base64 `content` field of a README payload.
///
/// GitHub wraps the encoded text at 60 columns, so whitespace is dropped
/// before decoding.
fn decode_content(encoded: &str) -> Result<String, String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}"))
}

/// Authenticated GitHub REST client.
///
/// Holds the HTTP client, API base URL, and token for reuse across requests.
#[derive(Debug)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: SecretString,
}

impl GitHubClient {
    /// Creates a client from configuration and an explicit token.
    ///
    /// # Errors
    ///
    /// Returns `RiceRankError::Config` if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, token: SecretString) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| RiceRankError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Issues an authenticated GET and decodes a 200 JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &Resource,
    ) -> crate::Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(url = %url, "GET");

        let network = |source| RiceRankError::Network {
            resource: resource.clone(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .header(
                AUTHORIZATION,
                format!("token {}", self.token.expose_secret()),
            )
            .send()
            .await
            .map_err(network)?;

        if let Some(limit) = RateLimitStatus::from_headers(response.headers()) {
            if limit.is_low() {
                warn!(
                    remaining = limit.remaining,
                    reset_at = limit.reset_at,
                    "{}",
                    limit.message()
                );
            } else {
                debug!(remaining = limit.remaining, limit = limit.limit, "Rate limit");
            }
        }

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => {
                return Err(RiceRankError::Unauthorized {
                    resource: resource.clone(),
                });
            }
            status => {
                return Err(RiceRankError::Status {
                    resource: resource.clone(),
                    status: status.as_u16(),
                });
            }
        }

        let body = response.bytes().await.map_err(network)?;
        serde_json::from_slice(&body).map_err(|e| RiceRankError::InvalidContent {
            resource: resource.clone(),
            message: e.to_string(),
        })
    }

    /// Fetches the README of `owner/name` and returns it as text.
    ///
    /// # Errors
    ///
    /// Any non-200 response, transport failure, or undecodable payload.
    #[instrument(skip(self))]
    pub async fn fetch_list_document(&self, owner: &str, name: &str) -> crate::Result<String> {
        let resource = Resource::ListDocument {
            owner: owner.to_string(),
            name: name.to_string(),
        };
        let payload: ReadmePayload = self
            .get_json(&format!("repos/{owner}/{name}/readme"), &resource)
            .await?;

        let encoded = payload
            .content
            .ok_or_else(|| RiceRankError::InvalidContent {
                resource: resource.clone(),
                message: "missing `content` field".to_string(),
            })?;

        let text = decode_content(&encoded)
            .map_err(|message| RiceRankError::InvalidContent { resource, message })?;
        debug!(bytes = text.len(), "Decoded list document");
        Ok(text)
    }

    /// Fetches star count, description, and language of a repository.
    ///
    /// # Errors
    ///
    /// Any non-200 response, transport failure, or malformed JSON.
    #[instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn fetch_repository(&self, repo: &RepoRef) -> crate::Result<RepoMetadata> {
        let path = repo.api_path();
        let resource = Resource::Repository { path: path.clone() };
        self.get_json(&format!("repos/{path}"), &resource).await
    }
}

#[async_trait]
impl RepoMetadataSource for GitHubClient {
    async fn repository(&self, repo: &RepoRef) -> crate::Result<RepoMetadata> {
        self.fetch_repository(repo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GitHubClient {
        let config = GitHubConfig {
            api_base_url: server.uri(),
            ..GitHubConfig::default()
        };
        GitHubClient::new(&config, SecretString::from("test-token".to_string())).unwrap()
    }

    fn repo(owner: &str, name: &str) -> RepoRef {
        RepoRef {
            url: format!("https://github.com/{owner}/{name}"),
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_owner_repo_valid() {
        let (owner, repo) = parse_owner_repo("zemmsoares/awesome-rices").unwrap();
        assert_eq!(owner, "zemmsoares");
        assert_eq!(repo, "awesome-rices");
    }

    #[test]
    fn test_parse_owner_repo_invalid() {
        assert!(parse_owner_repo("zemmsoares").is_err());
        assert!(parse_owner_repo("/repo").is_err());
        assert!(parse_owner_repo("owner/").is_err());
        assert!(parse_owner_repo("a/b/c").is_err());
    }

    #[test]
    fn test_decode_content_with_line_breaks() {
        // "# Rices\n" split across lines the way GitHub wraps it
        assert_eq!(decode_content("IyBS\naWNl\ncwo=\n").unwrap(), "# Rices\n");
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(decode_content("!!!not base64").unwrap_err().contains("base64"));
        // 0xff 0xfe is not valid UTF-8
        assert!(decode_content("//4=").unwrap_err().contains("UTF-8"));
    }

    #[tokio::test]
    async fn test_fetch_list_document_sends_headers_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/zemmsoares/awesome-rices/readme"))
            .and(header("accept", GITHUB_ACCEPT))
            .and(header("authorization", "token test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "encoding": "base64",
                "content": "IyBS\naWNl\ncwo=\n"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .fetch_list_document("zemmsoares", "awesome-rices")
            .await
            .unwrap();
        assert_eq!(text, "# Rices\n");
    }

    #[tokio::test]
    async fn test_fetch_list_document_non_200_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_list_document("x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, RiceRankError::Status { status: 404, .. }));
        assert_eq!(err.severity(), crate::error::Severity::Fatal);
    }

    #[tokio::test]
    async fn test_fetch_list_document_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_list_document("x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, RiceRankError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_fetch_list_document_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_list_document("x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, RiceRankError::InvalidContent { .. }));
    }

    #[tokio::test]
    async fn test_fetch_repository_reads_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/x/y"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-ratelimit-remaining", "42")
                    .insert_header("x-ratelimit-limit", "5000")
                    .set_body_json(serde_json::json!({
                        "full_name": "x/y",
                        "stargazers_count": 1234,
                        "description": "dotfiles",
                        "language": null
                    })),
            )
            .mount(&server)
            .await;

        let metadata = client(&server).fetch_repository(&repo("x", "y")).await.unwrap();
        assert_eq!(metadata.stargazers_count, 1234);
        assert_eq!(metadata.description.as_deref(), Some("dotfiles"));
        assert_eq!(metadata.language, None);
    }

    #[tokio::test]
    async fn test_fetch_repository_failure_is_degraded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_repository(&repo("x", "y"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.severity(), crate::error::Severity::Degraded);
    }

    #[tokio::test]
    async fn test_fetch_repository_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_repository(&repo("x", "y"))
            .await
            .unwrap_err();
        assert!(matches!(err, RiceRankError::InvalidContent { .. }));
        assert_eq!(err.severity(), crate::error::Severity::Degraded);
    }
}
