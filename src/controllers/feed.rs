use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::feed::{FeedService, FeedServiceApi, RenderedFeed},
    error::{AppError, AppResult},
};

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Query string for feed endpoints
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub page: Option<String>,
}

impl FeedQuery {
    fn page(&self) -> AppResult<Option<u32>> {
        self.page
            .as_deref()
            .map(|page| {
                page.parse::<u32>().map_err(|_| {
                    AppError::BadRequest(format!("page must be a positive integer, got {:?}", page))
                })
            })
            .transpose()
    }
}

pub struct FeedController {
    feed_service: Arc<FeedService>,
}

impl FeedController {
    pub fn new(feed_service: Arc<FeedService>) -> Self {
        Self { feed_service }
    }

    /// GET /{username} - Shots from players `username` follows, as RSS
    pub async fn following_feed(
        State(controller): State<Arc<FeedController>>,
        Path(username): Path<String>,
        Query(query): Query<FeedQuery>,
    ) -> AppResult<Response> {
        controller.render(&username, &query).await
    }

    /// GET / - No username given; the placeholder player is used
    pub async fn following_feed_without_user(
        State(controller): State<Arc<FeedController>>,
        Query(query): Query<FeedQuery>,
    ) -> AppResult<Response> {
        controller.render("", &query).await
    }

    async fn render(&self, username: &str, query: &FeedQuery) -> AppResult<Response> {
        let page = query.page()?;
        let feed = self.feed_service.following_feed(username, page).await?;

        let response = match feed {
            RenderedFeed::Rss(xml) => ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response(),
            RenderedFeed::RequestUrl(url) => {
                ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], url).into_response()
            }
        };
        Ok(response)
    }
}
