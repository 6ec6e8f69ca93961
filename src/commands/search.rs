//! Search command implementation.

use super::acquire_permit;
use crate::config::Config;
use crate::format::Formatter;
use crate::itunes::{PodcastCatalog, Store};
use crate::limiter::GlobalLimiter;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Executes a podcast search.
pub struct SearchCommand {
    config: Config,
    limiter: Option<Arc<GlobalLimiter>>,
}

impl SearchCommand {
    /// Creates a new search command. Without a limiter every call is admitted.
    pub fn new(config: Config, limiter: Option<Arc<GlobalLimiter>>) -> Self {
        Self { config, limiter }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let store = Store::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_store(&store, query).await
    }

    /// Executes the search with a provided store (for testing).
    pub async fn execute_with_store(
        &self,
        store: &impl PodcastCatalog,
        query: &str,
    ) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("Search query must not be empty");
        }

        acquire_permit(self.limiter.as_deref())?;

        info!("Searching for: {}", query);
        let podcasts = store
            .search(&self.config.region, query)
            .await
            .with_context(|| format!("Search for '{}' failed", query))?;

        debug!("Search returned {} podcasts", podcasts.len());

        Ok(Formatter::new(self.config.format).format_podcasts(&podcasts))
    }
}
