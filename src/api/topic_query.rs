use serde::{Deserialize, Serialize};

use super::OrderMode;

/// Which list the topic source is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicEndpoint {
    /// Recency-ordered list; also backs random ordering.
    Latest,
    /// Weekly-windowed top list.
    TopWeekly,
    Tag(String),
    TagIntersection(Vec<String>),
}

impl TopicEndpoint {
    /// Tags pick the source; ordering only matters when there are none.
    #[must_use]
    pub fn select(order: OrderMode, tags: &[String]) -> Self {
        match tags {
            [] => match order {
                OrderMode::Popular => Self::TopWeekly,
                OrderMode::Latest | OrderMode::Random => Self::Latest,
            },
            [tag] => Self::Tag(tag.clone()),
            _ => Self::TagIntersection(tags.to_vec()),
        }
    }

    /// Unencoded path segments, last one carrying the `.json` suffix.
    #[must_use]
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            Self::Latest => vec!["latest.json".to_owned()],
            Self::TopWeekly => vec!["top.json".to_owned()],
            Self::Tag(tag) => vec!["tag".to_owned(), format!("{tag}.json")],
            Self::TagIntersection(tags) => {
                let mut segments = vec!["tags".to_owned(), "intersection".to_owned()];
                if let Some((last, rest)) = tags.split_last() {
                    segments.extend(rest.iter().cloned());
                    segments.push(format!("{last}.json"));
                }
                segments
            }
        }
    }

    #[must_use]
    pub fn query_pairs(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::TopWeekly => &[("period", "weekly")],
            Self::Latest | Self::Tag(_) | Self::TagIntersection(_) => &[],
        }
    }

    /// Relative request path, for logging and simple hosts.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = format!("/{}", self.path_segments().join("/"));
        let query: Vec<String> = self
            .query_pairs()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }
        path
    }
}

/// A fully resolved read query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRequest {
    pub endpoint: TopicEndpoint,
    pub order: OrderMode,
    pub limit: usize,
}

impl TopicRequest {
    #[must_use]
    pub fn new(order: OrderMode, tags: &[String], limit: usize) -> Self {
        Self {
            endpoint: TopicEndpoint::select(order, tags),
            order,
            limit,
        }
    }
}
