use super::error::DribbbleClientError;
use async_trait::async_trait;

/// Outcome of a shots lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Parsed JSON body returned by the API
    Response(serde_json::Value),
    /// Debug mode: the URL that would have been requested
    DryRun(String),
}

/// Source of "following shots" data for a player.
/// Abstracts the Dribbble HTTP API so the feed service can run against a stub.
#[async_trait]
pub trait ShotsSource: Send + Sync {
    /// Fetch the shots of everyone `username` follows
    ///
    /// # Arguments
    /// * `username` - Non-empty player name; callers substitute `_` for a missing one
    /// * `page` - Optional 1-based page number
    ///
    /// # Errors
    /// Returns error on network failure, non-2xx status or a body that is not JSON
    async fn following_shots(
        &self,
        username: &str,
        page: Option<u32>,
    ) -> Result<Fetched, DribbbleClientError>;
}
