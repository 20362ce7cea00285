use super::error::FeedServiceError;
use super::render::FeedRenderer;
use crate::infrastructure::dribbble::{is_dot_segment, Fetched, ShotsSource};
use async_trait::async_trait;
use std::sync::Arc;

/// Sent upstream in place of a missing username
pub const EMPTY_USERNAME_PLACEHOLDER: &str = "_";

/// Result of a feed lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedFeed {
    /// RSS 2.0 document
    Rss(String),
    /// Upstream URL that would have been requested (client in debug mode)
    RequestUrl(String),
}

pub struct FeedService {
    source: Arc<dyn ShotsSource>,
    renderer: FeedRenderer,
}

impl FeedService {
    pub fn new(source: Arc<dyn ShotsSource>) -> Self {
        Self {
            source,
            renderer: FeedRenderer::new(),
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    async fn following_feed(
        &self,
        username: &str,
        page: Option<u32>,
    ) -> Result<RenderedFeed, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn following_feed(
        &self,
        username: &str,
        page: Option<u32>,
    ) -> Result<RenderedFeed, FeedServiceError> {
        if page == Some(0) {
            return Err(FeedServiceError::Invalid(
                "page must be a positive integer".to_string(),
            ));
        }

        if is_dot_segment(username) {
            return Err(FeedServiceError::Invalid(format!(
                "{:?} is not a valid username",
                username
            )));
        }

        let username = if username.is_empty() {
            EMPTY_USERNAME_PLACEHOLDER
        } else {
            username
        };

        tracing::info!(username = %username, page = ?page, "Building following feed");

        match self.source.following_shots(username, page).await? {
            Fetched::Response(data) => Ok(RenderedFeed::Rss(
                self.renderer.render_following_feed(&data)?,
            )),
            Fetched::DryRun(url) => Ok(RenderedFeed::RequestUrl(url)),
        }
    }
}
