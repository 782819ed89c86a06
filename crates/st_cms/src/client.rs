use async_trait::async_trait;
use st_core::{ContentSource, Error, QueryOptions, QueryResponse, Result};
use url::Url;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_CONTENT_TYPE: &str = "posts";

#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Repository endpoint, e.g. https://spacetraveling.cdn.prismic.io/api/v2
    pub api_url: String,
    pub page_size: u32,
    pub content_type: String,
}

impl CmsConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page size must be positive".to_string()));
        }
        Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("invalid api url {}: {}", self.api_url, e)))?;
        Ok(())
    }

    /// The fields the list view needs; full bodies stay with the source.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            page_size: self.page_size,
            fetch: vec![
                "post.title".to_string(),
                "post.subtitle".to_string(),
                "post.author".to_string(),
            ],
        }
    }
}

/// HTTP client for a Prismic-style document search API.
pub struct PrismicClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl PrismicClient {
    pub fn new(config: CmsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!("{}/documents/search", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(&self, content_type: &str, opts: &QueryOptions) -> Result<QueryResponse> {
        let predicate = format!("[[at(document.type,\"{}\")]]", content_type);
        let page_size = opts.page_size.to_string();
        let fetch = opts.fetch.join(",");
        let response = self
            .http
            .get(self.search_url())
            .query(&[
                ("q", predicate.as_str()),
                ("pageSize", page_size.as_str()),
                ("fetch", fetch.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<QueryResponse>()
            .await?;
        Ok(response)
    }

    async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse> {
        // The cursor is a URL the source produced; never reconstruct it.
        let response = self
            .http
            .get(cursor)
            .send()
            .await?
            .error_for_status()?
            .json::<QueryResponse>()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CmsConfig::new("https://spacetraveling.cdn.prismic.io/api/v2");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.content_type, "posts");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let mut config = CmsConfig::new("https://spacetraveling.cdn.prismic.io/api/v2");
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_bad_url() {
        let config = CmsConfig::new("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let client =
            PrismicClient::new(CmsConfig::new("https://cms.example/api/v2/")).unwrap();
        assert_eq!(client.search_url(), "https://cms.example/api/v2/documents/search");
    }
}
