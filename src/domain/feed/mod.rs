pub mod error;
pub mod flatten;
pub mod model;
pub mod render;
pub mod service;

pub use error::FeedServiceError;
pub use flatten::flatten;
pub use model::{FeedDocument, FeedItem, FlattenedRecord, FOLLOWING_FEED_TTL_SECS};
pub use render::{FeedRenderer, RenderError};
pub use service::{FeedService, FeedServiceApi, RenderedFeed, EMPTY_USERNAME_PLACEHOLDER};
