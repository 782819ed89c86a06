use std::sync::Arc;
use tokio::sync::Mutex;

use st_core::{ContentSource, Error, Post, Result};

use crate::client::CmsConfig;
use crate::normalize::normalize_response;

/// Outcome of a single extend attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendStatus {
    /// Fetched the next page and appended this many new posts.
    Appended(usize),
    /// The cursor was already terminal; nothing changed.
    Exhausted,
    /// Another extend is in flight for this feed; nothing changed.
    Busy,
}

/// The in-memory list state: an ordered post list plus the opaque cursor
/// to the next page. Created by `load`, mutated only by `extend`.
#[derive(Debug, Clone)]
pub struct PostFeed {
    posts: Vec<Post>,
    next_page: Option<String>,
}

impl PostFeed {
    /// Query the content source for the first page of posts.
    ///
    /// This runs once ahead of rendering; any failure here is fatal to
    /// startup, so it maps straight to `SourceUnavailable`.
    pub async fn load(source: &dyn ContentSource, config: &CmsConfig) -> Result<Self> {
        let response = source
            .query(&config.content_type, &config.query_options())
            .await
            .map_err(|e| Error::SourceUnavailable(e.to_string()))?;
        let (posts, next_page) = normalize_response(&response);
        Ok(Self { posts, next_page })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Fetch the page behind the current cursor and append its posts.
    ///
    /// Append-only: the existing prefix is never reordered or rewritten.
    /// On failure the feed is left untouched, cursor included, so the
    /// same call can be retried. A terminal cursor makes this a no-op.
    pub async fn extend(&mut self, source: &dyn ContentSource) -> Result<ExtendStatus> {
        let Some(cursor) = self.next_page.clone() else {
            return Ok(ExtendStatus::Exhausted);
        };

        tracing::debug!("fetching next page: {}", cursor);
        let response = source
            .fetch_page(&cursor)
            .await
            .map_err(|e| Error::ExtendFailed(e.to_string()))?;

        let (new_posts, next_page) = normalize_response(&response);
        let mut appended = 0;
        for post in new_posts {
            // A replayed cursor can hand back records already in the list.
            if let Some(id) = post.id.as_deref() {
                if self.posts.iter().any(|p| p.id.as_deref() == Some(id)) {
                    continue;
                }
            }
            self.posts.push(post);
            appended += 1;
        }
        self.next_page = next_page;
        Ok(ExtendStatus::Appended(appended))
    }
}

/// Shared handle to the one `PostFeed` a view owns.
///
/// `load_more` is single-flight: while one extend is suspended at the
/// network call, further triggers report `Busy` instead of racing on the
/// same cursor.
#[derive(Clone)]
pub struct SharedFeed {
    inner: Arc<Mutex<PostFeed>>,
}

impl SharedFeed {
    pub fn new(feed: PostFeed) -> Self {
        Self {
            inner: Arc::new(Mutex::new(feed)),
        }
    }

    /// Current posts plus whether more pages remain.
    pub async fn snapshot(&self) -> (Vec<Post>, bool) {
        let feed = self.inner.lock().await;
        (feed.posts().to_vec(), feed.has_more())
    }

    pub async fn load_more(&self, source: &dyn ContentSource) -> Result<ExtendStatus> {
        let mut feed = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Ok(ExtendStatus::Busy),
        };
        feed.extend(source).await
    }
}
