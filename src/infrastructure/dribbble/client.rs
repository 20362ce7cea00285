use super::error::DribbbleClientError;
use super::shots_source::{Fetched, ShotsSource};
use async_trait::async_trait;
use std::time::{Duration, Instant};

const USER_PLACEHOLDER: &str = "{user}";

/// Named Dribbble API calls and their path templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FollowingShots,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FollowingShots => "players_shots_following",
        }
    }

    pub fn path_template(&self) -> &'static str {
        match self {
            Operation::FollowingShots => "players/{user}/shots/following",
        }
    }
}

/// A single API call: operation, the player it targets, and ordered query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub operation: Operation,
    pub username: String,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(operation: Operation, username: impl Into<String>) -> Self {
        Self {
            operation,
            username: username.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Expand the path template and append the percent-encoded query string.
    /// Parameters keep the order they were added in; no `?` is emitted without them.
    pub fn url(&self, base_url: &str) -> Result<String, DribbbleClientError> {
        let path = self.path()?;
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}{}?{}", base_url, path, query);
        Ok(url.trim_end_matches('?').to_string())
    }

    fn path(&self) -> Result<String, DribbbleClientError> {
        let template = self.operation.path_template();
        if self.username.is_empty() || !template.contains(USER_PLACEHOLDER) {
            return Err(DribbbleClientError::RequestBuild {
                url: template.to_string(),
                reason: format!("{} needs a non-empty username", self.operation.name()),
            });
        }
        // Percent-encoding leaves `.` alone, and URL parsing would resolve these as dot segments
        if is_dot_segment(&self.username) {
            return Err(DribbbleClientError::RequestBuild {
                url: template.to_string(),
                reason: format!("{:?} is not a valid username", self.username),
            });
        }
        Ok(template.replace(USER_PLACEHOLDER, &urlencoding::encode(&self.username)))
    }
}

/// `.` and `..` would be collapsed out of the path by URL normalisation
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// HTTP client for the Dribbble REST API
pub struct DribbbleClient {
    base_url: String,
    debug: bool,
    http_client: reqwest::Client,
}

impl DribbbleClient {
    /// `base_url` must end with `/`; see `config::normalize_base_url`.
    /// With `debug` set, lookups return the built URL instead of calling out.
    pub fn new(base_url: String, timeout: Duration, debug: bool) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shotfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            debug,
            http_client,
        })
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn build_url(&self, request: &ApiRequest) -> Result<String, DribbbleClientError> {
        request.url(&self.base_url)
    }

    /// Build the URL for `request` and, unless in debug mode, GET it and parse the body as JSON
    pub async fn execute(&self, request: &ApiRequest) -> Result<Fetched, DribbbleClientError> {
        let url = self.build_url(request)?;
        if self.debug {
            tracing::debug!(operation = request.operation.name(), url = %url, "Debug mode, skipping request");
            return Ok(Fetched::DryRun(url));
        }

        let start = Instant::now();
        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DribbbleClientError::Transport {
                url: url.clone(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        tracing::info!(
            operation = request.operation.name(),
            url = %url,
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis(),
            "Dribbble API responded"
        );

        if !status.is_success() {
            return Err(DribbbleClientError::Transport {
                url,
                cause: format!("HTTP status {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DribbbleClientError::Transport {
                url: url.clone(),
                cause: e.to_string(),
            })?;

        let value = serde_json::from_str(&body).map_err(|e| DribbbleClientError::Parse {
            url: url.clone(),
            cause: e.to_string(),
        })?;

        Ok(Fetched::Response(value))
    }
}

#[async_trait]
impl ShotsSource for DribbbleClient {
    async fn following_shots(
        &self,
        username: &str,
        page: Option<u32>,
    ) -> Result<Fetched, DribbbleClientError> {
        let mut request = ApiRequest::new(Operation::FollowingShots, username);
        if let Some(page) = page {
            request = request.param("page", page);
        }
        self.execute(&request).await
    }
}
