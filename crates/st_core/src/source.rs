use async_trait::async_trait;
use crate::types::{QueryOptions, QueryResponse};
use crate::Result;

/// Capability consumed from the headless CMS. Injected into the loader
/// and appender so tests can substitute a fake.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Query the first page of documents of a given content type
    async fn query(&self, content_type: &str, opts: &QueryOptions) -> Result<QueryResponse>;

    /// Fetch the page behind a pagination cursor, used verbatim
    async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse>;
}
