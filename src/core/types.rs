use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sized rendition of a content item's preview image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub max_width: Option<u32>,
}

/// Engagement counters reported by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Engagement {
    pub views: u64,
    pub like_count: u64,
    pub reply_count: u64,
    pub posts_count: u64,
}

/// One card's worth of content. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub engagement: Option<Engagement>,
}

impl ContentItem {
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            thumbnails: Vec::new(),
            tags: Vec::new(),
            author: None,
            created_at: None,
            engagement: None,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_thumbnails(mut self, thumbnails: Vec<Thumbnail>) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.engagement = Some(engagement);
        self
    }

    /// Picks the narrowest thumbnail at least `target_width` wide, falling
    /// back to the widest one available.
    #[must_use]
    pub fn thumbnail_for_width(&self, target_width: u32) -> Option<&Thumbnail> {
        let width_of = |thumbnail: &Thumbnail| thumbnail.width.unwrap_or(0);
        self.thumbnails
            .iter()
            .filter(|thumbnail| width_of(thumbnail) >= target_width)
            .min_by_key(|thumbnail| width_of(thumbnail))
            .or_else(|| self.thumbnails.iter().max_by_key(|thumbnail| width_of(thumbnail)))
    }
}
