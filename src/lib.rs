//! podfinder - podcast discovery on top of the iTunes directory API
//!
//! Normalizes the directory's chart, search, lookup and review payloads into
//! plain records, fetches a podcast's details and reviews concurrently, and
//! throttles upstream traffic with a process-wide fixed-window limiter.

pub mod commands;
pub mod config;
pub mod format;
pub mod itunes;
pub mod limiter;

pub use config::Config;
pub use itunes::{
    get_podcast_with_reviews, PodcastCatalog, PodcastDetail, PodcastSummary, PodcastWithReviews,
    Region, Review, Store, StoreError,
};
pub use limiter::{GlobalLimiter, LimiterError};
