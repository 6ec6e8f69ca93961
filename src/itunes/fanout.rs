//! Concurrent podcast detail + reviews retrieval.

use crate::itunes::error::StoreError;
use crate::itunes::models::{PodcastDetail, PodcastWithReviews, Review};
use crate::itunes::store::PodcastCatalog;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fetches a podcast's metadata and its reviews in parallel.
///
/// Both upstream calls run as separate tasks and are always awaited to
/// completion. A failed lookup fails the whole operation and discards the
/// reviews. A failed reviews fetch is logged and degrades to an empty list.
pub async fn get_podcast_with_reviews<S>(
    store: Arc<S>,
    id: &str,
    region: &str,
) -> Result<PodcastWithReviews, StoreError>
where
    S: PodcastCatalog + ?Sized + 'static,
{
    let lookup: JoinHandle<Result<PodcastDetail, StoreError>> = {
        let store = Arc::clone(&store);
        let id = id.to_string();
        tokio::spawn(async move { store.lookup(&id).await })
    };

    let reviews: JoinHandle<Result<Vec<Review>, StoreError>> = {
        let store = Arc::clone(&store);
        let (id, region) = (id.to_string(), region.to_string());
        tokio::spawn(async move { store.reviews(&id, &region).await })
    };

    let (lookup, reviews) = tokio::join!(lookup, reviews);

    merge(id, join_outcome(lookup), join_outcome(reviews))
}

/// Unwraps a finished task, resuming its panic on this task if it panicked.
fn join_outcome<T>(result: Result<T, tokio::task::JoinError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

/// Applies the partial-failure policy to both outcomes.
fn merge(
    id: &str,
    lookup: Result<PodcastDetail, StoreError>,
    reviews: Result<Vec<Review>, StoreError>,
) -> Result<PodcastWithReviews, StoreError> {
    let detail = lookup?;

    let reviews = reviews.unwrap_or_else(|e| {
        warn!("Failed to fetch reviews for {}: {}", id, e);
        Vec::new()
    });

    debug!("Podcast {} merged with {} reviews", id, reviews.len());

    Ok(PodcastWithReviews { detail, reviews })
}
