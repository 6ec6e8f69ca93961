//! Decoders for the flat result-list payloads (search, lookup).

use super::Decode;
use crate::itunes::error::StoreError;
use crate::itunes::models::{PodcastDetail, PodcastSummary};
use serde::Deserialize;
use tracing::trace;

#[derive(Debug, Deserialize)]
struct ResultList<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchResult {
    collection_id: u64,
    artist_name: String,
    collection_name: String,
    artwork_url600: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LookupResult {
    collection_id: u64,
    artist_name: String,
    collection_name: String,
    artwork_url600: String,
    track_count: u32,
    collection_view_url: String,
    feed_url: String,
    genres: Vec<String>,
}

/// Decodes `/search` responses into summaries, preserving upstream order.
pub struct SearchDecoder;

impl Decode for SearchDecoder {
    type Output = Vec<PodcastSummary>;

    fn decode(bytes: &[u8]) -> Result<Self::Output, StoreError> {
        let list: ResultList<SearchResult> = serde_json::from_slice(bytes)?;
        trace!("Decoded {} search results", list.results.len());

        Ok(list
            .results
            .into_iter()
            .map(|r| PodcastSummary {
                id: r.collection_id.to_string(),
                artist: r.artist_name,
                name: r.collection_name,
                image_url: r.artwork_url600,
            })
            .collect())
    }
}

/// Decodes `/lookup` responses. Exactly one result is required.
pub struct LookupDecoder;

impl Decode for LookupDecoder {
    type Output = PodcastDetail;

    fn decode(bytes: &[u8]) -> Result<Self::Output, StoreError> {
        let list: ResultList<LookupResult> = serde_json::from_slice(bytes)?;

        let mut results = list.results;
        if results.len() != 1 {
            return Err(StoreError::InvalidResultCount(results.len()));
        }
        let r = results.remove(0);

        Ok(PodcastDetail {
            id: r.collection_id.to_string(),
            artist: r.artist_name,
            name: r.collection_name,
            image_url: r.artwork_url600,
            episode_count: r.track_count,
            page_url: r.collection_view_url,
            feed_url: r.feed_url,
            genres: r.genres,
        })
    }
}
