use async_trait::async_trait;
use shared::domain::Post;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Why a fetch produced no usable collection. Each variant keeps the
/// underlying cause so a front end can report it once and move on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach the post source: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("post source answered with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("post source payload is not a post array: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// Where the post collection comes from. The browser performs exactly one
/// fetch per view through this seam, so tests can swap in a canned source
/// without any network.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Post>, FetchError>;
}

/// Fetches the collection from `<base_url>/posts` as a JSON array.
pub struct HttpPostSource {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPostSource {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_all(&self) -> Result<Vec<Post>, FetchError> {
        let url = format!("{}/posts", self.base_url.as_str().trim_end_matches('/'));
        debug!(url = %url, "fetch: requesting post collection");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { source })?;
        let posts: Vec<Post> =
            serde_json::from_slice(&body).map_err(|source| FetchError::Decode { source })?;

        info!(count = posts.len(), "fetch: post collection received");
        Ok(posts)
    }
}
