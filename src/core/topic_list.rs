use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::{ContentItem, Engagement, Thumbnail};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct TopicListPayload {
    topic_list: TopicListBody,
}

#[derive(Debug, Deserialize)]
struct TopicListBody {
    #[serde(default)]
    topics: Vec<TopicRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagRecord {
    Name(String),
    Object { name: String },
}

#[derive(Debug, Deserialize)]
struct ThumbnailRecord {
    url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    max_width: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TopicRecord {
    id: u64,
    title: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    thumbnails: Option<Vec<ThumbnailRecord>>,
    #[serde(default)]
    tags: Vec<TagRecord>,
    #[serde(default)]
    last_poster_username: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    views: Option<u64>,
    #[serde(default)]
    like_count: Option<u64>,
    #[serde(default)]
    reply_count: Option<u64>,
    #[serde(default)]
    posts_count: Option<u64>,
}

impl TopicRecord {
    fn into_item(self) -> ContentItem {
        let url = self.url.unwrap_or_else(|| match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => format!("/t/{slug}/{}", self.id),
            _ => format!("/t/{}", self.id),
        });
        let thumbnails = self
            .thumbnails
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| {
                record.url.map(|url| Thumbnail {
                    url,
                    width: record.width,
                    height: record.height,
                    max_width: record.max_width,
                })
            })
            .collect();
        let tags = self
            .tags
            .into_iter()
            .map(|tag| match tag {
                TagRecord::Name(name) | TagRecord::Object { name } => name,
            })
            .collect();
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|time| time.with_timezone(&Utc));
        let has_counters = self.views.is_some()
            || self.like_count.is_some()
            || self.reply_count.is_some()
            || self.posts_count.is_some();
        let engagement = has_counters.then(|| Engagement {
            views: self.views.unwrap_or(0),
            like_count: self.like_count.unwrap_or(0),
            reply_count: self.reply_count.unwrap_or(0),
            posts_count: self.posts_count.unwrap_or(0),
        });

        ContentItem {
            id: self.id,
            title: self.title,
            url,
            thumbnails,
            tags,
            author: self.last_poster_username,
            created_at,
            engagement,
        }
    }
}

/// Decodes a `{"topic_list": {"topics": [...]}}` payload into content items,
/// preserving source order.
pub fn decode_topic_list(body: &str) -> Result<Vec<ContentItem>, FetchError> {
    let payload: TopicListPayload =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(payload
        .topic_list
        .topics
        .into_iter()
        .map(TopicRecord::into_item)
        .collect())
}
