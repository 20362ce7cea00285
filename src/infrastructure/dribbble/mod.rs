pub mod client;
pub mod error;
pub mod shots_source;

pub use client::{is_dot_segment, ApiRequest, DribbbleClient, Operation};
pub use error::DribbbleClientError;
pub use shots_source::{Fetched, ShotsSource};
