use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized blog post summary as rendered in the list view.
///
/// `id` is the source-provided slug and is unique within a list.
/// `published_at` keeps the raw timestamp; formatting is left to the
/// presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub summary: PostSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One record as delivered by the content source, before normalization.
///
/// `data` is duck-typed on the wire; field extraction happens in the
/// normalization boundary, never here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub uid: Option<String>,
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Paginated response shape shared by the search query and by a cursor
/// fetch. `next_page` is an opaque URL; absent means no more pages.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<RawRecord>,
    pub next_page: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub page_size: u32,
    pub fetch: Vec<String>,
}
