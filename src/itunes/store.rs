//! Region-scoped operations against the iTunes directory.

use crate::config::Config;
use crate::itunes::client::{HttpGetter, WreqGetter};
use crate::itunes::error::{Endpoint, StoreError};
use crate::itunes::models::{PodcastDetail, PodcastSummary, Review};
use crate::itunes::parser::{Decode, LookupDecoder, ReviewsDecoder, SearchDecoder, TopChartDecoder};
use crate::itunes::regions;
use async_trait::async_trait;
use tracing::{debug, info};

/// Upstream used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Directory operations - enables mocking the store in tests.
#[async_trait]
pub trait PodcastCatalog: Send + Sync {
    /// Top ten podcasts for a region.
    async fn top(&self, region: &str) -> Result<Vec<PodcastSummary>, StoreError>;

    /// Podcasts matching `query` in a region.
    async fn search(&self, region: &str, query: &str) -> Result<Vec<PodcastSummary>, StoreError>;

    /// Full metadata for a single podcast id.
    async fn lookup(&self, id: &str) -> Result<PodcastDetail, StoreError>;

    /// Customer reviews for a podcast in a region.
    async fn reviews(&self, id: &str, region: &str) -> Result<Vec<Review>, StoreError>;
}

/// iTunes store client. Holds only immutable configuration.
pub struct Store<G = WreqGetter> {
    base_url: String,
    getter: G,
}

impl Store<WreqGetter> {
    /// Creates a store with the production HTTP getter.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_getter(&config.base_url, WreqGetter::new(config)?))
    }
}

impl<G: HttpGetter> Store<G> {
    /// Creates a store over a custom getter. An empty base URL selects [`DEFAULT_BASE_URL`].
    pub fn with_getter(base_url: impl Into<String>, getter: G) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url.trim_end_matches('/').to_string()
        };

        Self { base_url, getter }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn top_url(&self, region: &str) -> String {
        format!("{}/{}/rss/toppodcasts/limit=10/json", self.base_url, regions::resolve(region))
    }

    fn search_url(&self, region: &str, query: &str) -> String {
        format!(
            "{}/search?media=podcast&entity=podcast&country={}&term={}",
            self.base_url,
            regions::resolve(region),
            urlencoding::encode(query)
        )
    }

    fn lookup_url(&self, id: &str) -> String {
        format!("{}/lookup?id={}", self.base_url, urlencoding::encode(id))
    }

    fn reviews_url(&self, id: &str, region: &str) -> String {
        format!(
            "{}/{}/rss/customerreviews/id={}/json",
            self.base_url,
            regions::resolve(region),
            urlencoding::encode(id)
        )
    }

    /// Performs the call, requires HTTP 200 and decodes the body with `D`.
    async fn fetch<D: Decode>(
        &self,
        endpoint: Endpoint,
        url: &str,
    ) -> Result<D::Output, StoreError> {
        let response = self.getter.get(url).await?;

        if response.status != 200 {
            debug!("{} returned status {}", endpoint, response.status);
            return Err(StoreError::Upstream {
                endpoint,
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        D::decode(&response.body)
    }
}

#[async_trait]
impl<G: HttpGetter> PodcastCatalog for Store<G> {
    async fn top(&self, region: &str) -> Result<Vec<PodcastSummary>, StoreError> {
        info!("Fetching top podcasts (region {})", regions::resolve(region));
        self.fetch::<TopChartDecoder>(Endpoint::TopPodcasts, &self.top_url(region)).await
    }

    async fn search(&self, region: &str, query: &str) -> Result<Vec<PodcastSummary>, StoreError> {
        info!("Searching: {} (region {})", query, regions::resolve(region));
        self.fetch::<SearchDecoder>(Endpoint::Search, &self.search_url(region, query)).await
    }

    async fn lookup(&self, id: &str) -> Result<PodcastDetail, StoreError> {
        info!("Looking up podcast: {}", id);
        self.fetch::<LookupDecoder>(Endpoint::Lookup, &self.lookup_url(id)).await
    }

    async fn reviews(&self, id: &str, region: &str) -> Result<Vec<Review>, StoreError> {
        info!("Fetching reviews for {} (region {})", id, regions::resolve(region));
        self.fetch::<ReviewsDecoder>(Endpoint::CustomerReviews, &self.reviews_url(id, region))
            .await
    }
}
