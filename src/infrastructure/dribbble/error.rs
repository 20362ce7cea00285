/// Failures talking to the Dribbble API. Every variant names the URL involved
/// so operators can reproduce the call.
#[derive(Debug, thiserror::Error)]
pub enum DribbbleClientError {
    #[error("could not build request for \"{url}\": {reason}")]
    RequestBuild { url: String, reason: String },

    #[error("couldn't access \"{url}\", error \"{cause}\"")]
    Transport { url: String, cause: String },

    #[error("invalid JSON from \"{url}\", error \"{cause}\"")]
    Parse { url: String, cause: String },
}

impl DribbbleClientError {
    pub fn url(&self) -> &str {
        match self {
            Self::RequestBuild { url, .. } | Self::Transport { url, .. } | Self::Parse { url, .. } => {
                url
            }
        }
    }
}
