//! HTTP side of the rank lookup: the profile page, the structured query
//! endpoint, and the site's own published artifact.

pub mod models;

use log::debug;
use rank_core::config::{expand_profile_url, ResolverConfig};
use rank_core::domain::{RankRecord, SourceError, SubmissionCount};
use rank_core::ports::{ArtifactReader, RankSource};
use reqwest::blocking::{Client, Response};
use reqwest::header::CACHE_CONTROL;

use crate::models::build_payload;

const USER_AGENT: &str = concat!("portfolio-rank/", env!("CARGO_PKG_VERSION"));

fn default_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn transport(e: reqwest::Error) -> SourceError {
    SourceError::Transport(e.to_string())
}

fn check_status(resp: Response) -> Result<Response, SourceError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(resp)
}

/// Talks to the public profile page and the GraphQL endpoint.
/// Only the endpoints are taken from the config; the username comes with each call.
pub struct HttpRankSource {
    profile_url_template: String,
    graphql_url: String,
    client: Client,
}

impl HttpRankSource {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            profile_url_template: config.profile_url_template.clone(),
            graphql_url: config.graphql_url.clone(),
            client: default_client(),
        }
    }
}

impl RankSource for HttpRankSource {
    fn fetch_profile_html(&self, username: &str) -> Result<String, SourceError> {
        let url = expand_profile_url(&self.profile_url_template, username);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().map_err(transport)?;
        check_status(resp)?.text().map_err(transport)
    }

    fn fetch_submission_stats(&self, username: &str) -> Result<Vec<SubmissionCount>, SourceError> {
        debug!("POST {}", self.graphql_url);
        let resp = self
            .client
            .post(&self.graphql_url)
            .json(&build_payload(username))
            .send()
            .map_err(transport)?;

        let response: models::Response = check_status(resp)?
            .json()
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        response
            .into_submission_counts()
            .ok_or_else(|| SourceError::Malformed("missing data.matchedUser.submitStats".to_string()))
    }
}

/// Reads the artifact the site publishes, bypassing caches
pub struct HttpArtifactReader {
    url: String,
    client: Client,
}

impl HttpArtifactReader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: default_client(),
        }
    }
}

impl ArtifactReader for HttpArtifactReader {
    fn read(&self) -> Result<RankRecord, SourceError> {
        debug!("GET {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .map_err(transport)?;

        check_status(resp)?
            .json()
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// The blocking client must be built and dropped off the async runtime
    async fn blocking<T, F>(f: F) -> T
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        tokio::task::spawn_blocking(f).await.expect("blocking task")
    }

    fn config_for(base: &str) -> ResolverConfig {
        ResolverConfig {
            username: "site-owner".to_string(),
            profile_url_template: format!("{}/u/{{username}}/", base),
            graphql_url: format!("{}/graphql", base),
        }
    }

    fn fetch_stats(base: String) -> impl FnOnce() -> Result<Vec<SubmissionCount>, SourceError> {
        move || HttpRankSource::new(&config_for(&base)).fetch_submission_stats("tester")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_profile_html_uses_requested_username() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/u/tester/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"<html>{"ranking": 4321}</html>"#))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let html = blocking(move || HttpRankSource::new(&config_for(&base)).fetch_profile_html("tester"))
            .await
            .unwrap();
        assert!(html.contains("4321"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_profile_html_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/u/tester/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let base = server.uri();
        let result = blocking(move || HttpRankSource::new(&config_for(&base)).fetch_profile_html("tester")).await;
        assert_eq!(result, Err(SourceError::Status(404)));
    }

    #[test]
    fn test_fetch_profile_html_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let source = HttpRankSource::new(&config_for(&base));
        assert!(matches!(
            source.fetch_profile_html("tester"),
            Err(SourceError::Transport(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_submission_stats() {
        let server = MockServer::start().await;
        let body = r#"{"data":{"matchedUser":{"username":"tester","submitStats":{"acSubmissionNum":[{"difficulty":"All","count":137},{"difficulty":"Easy","count":100}]}}}}"#;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({ "variables": { "username": "tester" } })))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let counts = blocking(fetch_stats(server.uri())).await.unwrap();
        assert_eq!(counts[0].difficulty, "All");
        assert_eq!(counts[0].count, 137);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_submission_stats_skips_null_entries() {
        let server = MockServer::start().await;
        let body = r#"{"data":{"matchedUser":{"submitStats":{"acSubmissionNum":[{"difficulty":null,"count":1},{"difficulty":"All","count":137}]}}}}"#;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let counts = blocking(fetch_stats(server.uri())).await.unwrap();
        assert_eq!(rank_core::extract::solved_from_stats(&counts), Some("Solved: 137".to_string()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_submission_stats_unknown_user_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{"matchedUser":null}}"#))
            .mount(&server)
            .await;

        let result = blocking(fetch_stats(server.uri())).await;
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_submission_stats_non_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let result = blocking(fetch_stats(server.uri())).await;
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    async fn serve_artifact(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/data/leetcode.json"))
            .and(header("cache-control", "no-cache"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    async fn read_artifact(server: &MockServer) -> Result<RankRecord, SourceError> {
        let url = format!("{}/assets/data/leetcode.json", server.uri());
        blocking(move || HttpArtifactReader::new(url).read()).await
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_artifact_reader_hit() {
        let server = serve_artifact(
            200,
            r#"{"rank":"48213","formatted":"48,213","updated":"2025-12-16T10:30:00.000Z"}"#,
        )
        .await;

        let record = read_artifact(&server).await.unwrap();
        assert_eq!(record.display_value(), Some("48,213"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_artifact_reader_null_updated_is_still_a_hit() {
        let server = serve_artifact(200, r#"{"rank":"48213","formatted":"48,213","updated":null}"#).await;

        let record = read_artifact(&server).await.unwrap();
        assert_eq!(record.display_value(), Some("48,213"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_artifact_reader_missing_file() {
        let server = serve_artifact(404, "").await;
        assert_eq!(read_artifact(&server).await, Err(SourceError::Status(404)));
    }
}
