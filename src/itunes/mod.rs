//! iTunes directory access: transport, decoding, region catalog and fan-out.

pub mod client;
pub mod error;
pub mod fanout;
pub mod models;
pub mod parser;
pub mod regions;
pub mod store;

pub use client::{HttpGetter, HttpResponse, WreqGetter};
pub use error::{Endpoint, StoreError};
pub use fanout::get_podcast_with_reviews;
pub use models::{PodcastDetail, PodcastSummary, PodcastWithReviews, Review};
pub use regions::Region;
pub use store::{PodcastCatalog, Store, DEFAULT_BASE_URL};
