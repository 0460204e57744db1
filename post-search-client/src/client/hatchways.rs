use super::PostProvider;
use crate::post::PostsPacket;
use crate::{Error, Post};
use ::utils::surf_logging::SurfLogging;
use async_trait::async_trait;
use std::time::Duration;
use surf::{Client, Url};

pub const DEFAULT_BASE_URL: &str = "https://api.hatchways.io/assessment/blog/posts";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The hatchways blog API: `GET {base_url}?tag={tag}` answers `{"posts": [...]}`.
#[derive(Clone)]
pub struct Hatchways {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for Hatchways {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT)
    }
}

impl Hatchways {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: Client::new().with(SurfLogging),
            base_url: base_url.into(),
            timeout,
        }
    }

    fn tag_url(&self, tag: &str) -> Result<Url, Error> {
        let raw = format!("{}?tag={}", self.base_url, urlencoding::encode(tag));
        Url::parse(&raw).map_err(|err| Error::Request {
            tag: tag.to_string(),
            message: err.to_string(),
        })
    }

    async fn fetch(&self, tag: &str) -> Result<Vec<Post>, Error> {
        let url = self.tag_url(tag)?;
        let request_error = |err: surf::Error| Error::Request {
            tag: tag.to_string(),
            message: err.to_string(),
        };

        let mut response = self.http.get(url).await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                tag: tag.to_string(),
                status: status.into(),
            });
        }

        let body = response.body_bytes().await.map_err(request_error)?;
        let packet: PostsPacket = serde_json::from_slice(&body).map_err(|source| Error::Decode {
            tag: tag.to_string(),
            source,
        })?;
        log::debug!("Tag '{}' returned {} posts", tag, packet.posts.len());
        Ok(packet.posts)
    }
}

#[async_trait]
impl PostProvider for Hatchways {
    async fn fetch_tag(&self, tag: &str) -> Result<Vec<Post>, Error> {
        match tokio::time::timeout(self.timeout, self.fetch(tag)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                tag: tag.to_string(),
                after: self.timeout,
            }),
        }
    }
}
