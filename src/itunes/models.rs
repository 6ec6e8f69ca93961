//! Domain records produced from iTunes directory responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A podcast as listed in top charts and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastSummary {
    /// iTunes collection id
    pub id: String,
    pub artist: String,
    pub name: String,
    /// Artwork URL
    pub image_url: String,
}

/// Full podcast metadata from a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastDetail {
    pub id: String,
    pub artist: String,
    pub name: String,
    pub image_url: String,
    /// Number of episodes (upstream `trackCount`)
    pub episode_count: u32,
    /// Podcast page on the store
    pub page_url: String,
    /// RSS feed URL
    pub feed_url: String,
    pub genres: Vec<String>,
}

/// A customer review of a podcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    /// Star rating (0 - 5). Zero also stands for an unparsable rating.
    pub rating_stars: u8,
    /// Publication time. 0001-01-01 UTC stands for an unparsable date.
    pub published_at: DateTime<Utc>,
}

impl Review {
    /// Renders the rating as filled and empty stars, e.g. `★★★☆☆`.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating_stars.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// A podcast detail merged with its reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastWithReviews {
    pub detail: PodcastDetail,
    pub reviews: Vec<Review>,
}
