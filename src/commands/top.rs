//! Top charts command implementation.

use super::acquire_permit;
use crate::config::Config;
use crate::format::Formatter;
use crate::itunes::{PodcastCatalog, Store};
use crate::limiter::GlobalLimiter;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Lists the top podcasts of the configured region.
pub struct TopCommand {
    config: Config,
    limiter: Option<Arc<GlobalLimiter>>,
}

impl TopCommand {
    /// Creates a new top command. Without a limiter every call is admitted.
    pub fn new(config: Config, limiter: Option<Arc<GlobalLimiter>>) -> Self {
        Self { config, limiter }
    }

    /// Fetches the chart and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let store = Store::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_store(&store).await
    }

    /// Fetches the chart with a provided store (for testing).
    pub async fn execute_with_store(&self, store: &impl PodcastCatalog) -> Result<String> {
        acquire_permit(self.limiter.as_deref())?;

        let podcasts =
            store.top(&self.config.region).await.context("Failed to fetch top podcasts")?;
        info!("Found {} top podcasts", podcasts.len());

        Ok(Formatter::new(self.config.format).format_podcasts(&podcasts))
    }
}
