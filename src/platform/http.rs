use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::api::{TopicReply, TopicRequest};
use crate::core::{ContentItem, decode_topic_list};
use crate::error::{CarouselError, CarouselResult, FetchError};

use super::TopicSource;

/// Blocking topic source against a forum base URL. Replies synchronously.
#[derive(Debug, Clone)]
pub struct HttpTopicSource {
    client: Client,
    base_url: Url,
}

impl HttpTopicSource {
    pub fn new(base_url: &str) -> CarouselResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CarouselError::InvalidData(format!("invalid base url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CarouselError::InvalidData(format!(
                "base url `{base_url}` cannot carry a path"
            )));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Absolute URL for `request`, with path segments percent-encoded.
    #[must_use]
    pub fn request_url(&self, request: &TopicRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(request.endpoint.path_segments());
        }
        let pairs = request.endpoint.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs.iter().copied());
        }
        url
    }

    /// Fetches and decodes `request` outside the controller's reply flow.
    pub fn fetch_now(&self, request: &TopicRequest) -> CarouselResult<Vec<ContentItem>> {
        Ok(self.fetch_blocking(request)?)
    }

    fn fetch_blocking(&self, request: &TopicRequest) -> Result<Vec<ContentItem>, FetchError> {
        let url = self.request_url(request);
        debug!(%url, "requesting topic list");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::from_response(status.as_u16(), &body));
        }
        decode_topic_list(&body)
    }
}

impl TopicSource for HttpTopicSource {
    fn fetch(&mut self, request: &TopicRequest, reply: TopicReply) {
        reply.resolve(self.fetch_blocking(request));
    }
}
