use super::render::RenderError;
use crate::error::AppError;
use crate::infrastructure::dribbble::DribbbleClientError;

#[derive(Debug, thiserror::Error)]
pub enum FeedServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Upstream(#[from] DribbbleClientError),
    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),
    #[error("render error: {0}")]
    Render(String),
}

impl From<RenderError> for FeedServiceError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::MalformedResponse(_) => FeedServiceError::InvalidResponse(err.to_string()),
            RenderError::MalformedShot { .. } | RenderError::Xml(_) => {
                FeedServiceError::Render(err.to_string())
            }
        }
    }
}

impl From<FeedServiceError> for AppError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::Invalid(msg) => AppError::BadRequest(msg),
            FeedServiceError::Upstream(e @ DribbbleClientError::RequestBuild { .. }) => {
                AppError::Internal(e.to_string())
            }
            FeedServiceError::Upstream(e) => AppError::ExternalService(e.to_string()),
            FeedServiceError::InvalidResponse(msg) => AppError::ExternalService(msg),
            FeedServiceError::Render(msg) => AppError::Internal(msg),
        }
    }
}
