//! Podcast detail command implementation.

use super::acquire_permit;
use crate::config::Config;
use crate::format::Formatter;
use crate::itunes::{get_podcast_with_reviews, PodcastCatalog, PodcastWithReviews, Store};
use crate::limiter::GlobalLimiter;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shows a podcast's details together with its reviews.
pub struct PodcastCommand {
    config: Config,
    limiter: Option<Arc<GlobalLimiter>>,
}

impl PodcastCommand {
    /// Creates a new podcast command. Without a limiter every call is admitted.
    pub fn new(config: Config, limiter: Option<Arc<GlobalLimiter>>) -> Self {
        Self { config, limiter }
    }

    /// Fetches one podcast by id and returns formatted output.
    pub async fn execute(&self, id: &str) -> Result<String> {
        let store = Arc::new(Store::new(&self.config).context("Failed to create HTTP client")?);

        self.execute_with_store(store, id).await
    }

    /// Fetches one podcast with a provided store (for testing).
    pub async fn execute_with_store<S>(&self, store: Arc<S>, id: &str) -> Result<String>
    where
        S: PodcastCatalog + 'static,
    {
        let podcast = self.fetch(store, id).await?;

        Ok(Formatter::new(self.config.format).format_podcast(&podcast))
    }

    /// Fetches several podcasts. Failed ids are reported on stderr and skipped.
    pub async fn execute_batch(&self, ids: &[String]) -> Result<String> {
        let store = Arc::new(Store::new(&self.config).context("Failed to create HTTP client")?);

        self.execute_batch_with_store(store, ids).await
    }

    /// Fetches several podcasts with a provided store (for testing).
    pub async fn execute_batch_with_store<S>(&self, store: Arc<S>, ids: &[String]) -> Result<String>
    where
        S: PodcastCatalog + 'static,
    {
        let formatter = Formatter::new(self.config.format);
        let mut sections = Vec::new();

        for id in ids {
            match self.fetch(Arc::clone(&store), id).await {
                Ok(podcast) => sections.push(formatter.format_podcast(&podcast)),
                Err(e) => eprintln!("Skipping {}: {:#}", id.trim(), e),
            }
        }

        Ok(sections.join("\n\n"))
    }

    async fn fetch<S>(&self, store: Arc<S>, id: &str) -> Result<PodcastWithReviews>
    where
        S: PodcastCatalog + 'static,
    {
        let id = id.trim();
        if id.is_empty() {
            anyhow::bail!("Podcast not found: empty id");
        }

        acquire_permit(self.limiter.as_deref())?;

        info!("Looking up podcast: {}", id);
        get_podcast_with_reviews(store, id, &self.config.region)
            .await
            .with_context(|| format!("Podcast not found: {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::itunes::{PodcastDetail, PodcastSummary, Review, StoreError};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Mock store: lookup succeeds only for known ids, reviews can be switched off.
    struct MockStore {
        known_id: &'static str,
        reviews_fail: bool,
        lookups: AtomicU32,
    }

    impl MockStore {
        fn new(known_id: &'static str) -> Self {
            Self { known_id, reviews_fail: false, lookups: AtomicU32::new(0) }
        }
    }

    #[async_trait]
    impl PodcastCatalog for MockStore {
        async fn top(&self, _: &str) -> Result<Vec<PodcastSummary>, StoreError> {
            unimplemented!()
        }

        async fn search(&self, _: &str, _: &str) -> Result<Vec<PodcastSummary>, StoreError> {
            unimplemented!()
        }

        async fn lookup(&self, id: &str) -> Result<PodcastDetail, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if id != self.known_id {
                return Err(StoreError::InvalidResultCount(0));
            }
            Ok(PodcastDetail {
                id: id.to_string(),
                artist: "CGP Grey & Brady Haran".to_string(),
                name: "Hello Internet".to_string(),
                image_url: String::new(),
                episode_count: 100,
                page_url: String::new(),
                feed_url: String::new(),
                genres: vec!["Education".to_string()],
            })
        }

        async fn reviews(&self, id: &str, _: &str) -> Result<Vec<Review>, StoreError> {
            if self.reviews_fail {
                return Err(StoreError::Transport("timed out".to_string()));
            }
            Ok(vec![Review {
                id: format!("{id}-r1"),
                author: "fan".to_string(),
                title: "Great show".to_string(),
                content: "Loved it".to_string(),
                rating_stars: 5,
                published_at: DateTime::<Utc>::default(),
            }])
        }
    }

    #[tokio::test]
    async fn test_podcast_command_basic() {
        let store = Arc::new(MockStore::new("811377230"));
        let cmd = PodcastCommand::new(Config::default(), None);

        let output = cmd.execute_with_store(store, "811377230").await.unwrap();
        assert!(output.contains("Hello Internet"));
        assert!(output.contains("Episodes: 100"));
        assert!(output.contains("Great show"));
    }

    #[tokio::test]
    async fn test_podcast_command_reviews_unavailable() {
        let store = Arc::new(MockStore { reviews_fail: true, ..MockStore::new("811377230") });
        let cmd = PodcastCommand::new(Config::default(), None);

        let output = cmd.execute_with_store(store, "811377230").await.unwrap();
        assert!(output.contains("Hello Internet"));
        assert!(output.contains("No reviews."));
    }

    #[tokio::test]
    async fn test_podcast_command_not_found() {
        let store = Arc::new(MockStore::new("811377230"));
        let cmd = PodcastCommand::new(Config::default(), None);

        let err = cmd.execute_with_store(store, "123").await.unwrap_err();
        assert!(err.to_string().contains("Podcast not found: 123"));
        assert!(format!("{:#}", err).contains("invalid lookup result length"));
    }

    #[tokio::test]
    async fn test_podcast_command_empty_id() {
        let store = Arc::new(MockStore::new("811377230"));
        let cmd = PodcastCommand::new(Config::default(), None);

        let err = cmd.execute_with_store(Arc::clone(&store), "  ").await.unwrap_err();
        assert!(err.to_string().contains("empty id"));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_podcast_command_json_format() {
        let store = Arc::new(MockStore::new("811377230"));
        let config = Config { format: OutputFormat::Json, ..Config::default() };

        let cmd = PodcastCommand::new(config, None);

        let output = cmd.execute_with_store(store, "811377230").await.unwrap();
        let parsed: PodcastWithReviews = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.detail.episode_count, 100);
        assert_eq!(parsed.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_podcast_command_batch_skips_failures() {
        let store = Arc::new(MockStore::new("811377230"));
        let cmd = PodcastCommand::new(Config::default(), None);

        let ids = vec!["811377230".to_string(), "404".to_string(), "".to_string()];
        let output = cmd.execute_batch_with_store(Arc::clone(&store), &ids).await.unwrap();

        assert_eq!(output.matches("Hello Internet").count(), 1);
        assert_eq!(store.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_podcast_command_batch_respects_limiter() {
        let store = Arc::new(MockStore::new("811377230"));
        let limiter = GlobalLimiter::new(2, Duration::from_secs(60)).unwrap();
        let cmd = PodcastCommand::new(Config::default(), Some(limiter));

        let ids = vec!["811377230".to_string(); 3];
        let output = cmd.execute_batch_with_store(Arc::clone(&store), &ids).await.unwrap();

        assert_eq!(output.matches("Hello Internet").count(), 2);
        assert_eq!(store.lookups.load(Ordering::SeqCst), 2);
    }
}
