//! Decoders for the Atom-like feed payloads (top charts, customer reviews).

use super::Decode;
use crate::itunes::error::StoreError;
use crate::itunes::models::{PodcastSummary, Review};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envelope {
    feed: Feed,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Feed {
    entry: Value,
}

impl Envelope {
    /// Extracts typed entries. The feed collapses a one-element `entry` list
    /// into a bare object and omits the key when there are no entries.
    fn into_entries<T: DeserializeOwned>(self) -> Result<Vec<T>, StoreError> {
        let entries = match self.feed.entry {
            Value::Null => Vec::new(),
            entry @ Value::Object(_) => vec![serde_json::from_value(entry)?],
            entries => serde_json::from_value(entries)?,
        };
        Ok(entries)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Label {
    label: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartEntry {
    id: ChartId,
    #[serde(rename = "im:artist")]
    artist: Label,
    #[serde(rename = "im:name")]
    name: Label,
    #[serde(rename = "im:image")]
    images: Vec<Image>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartId {
    attributes: ChartIdAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartIdAttributes {
    #[serde(rename = "im:id")]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Image {
    attributes: ImageAttributes,
    label: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageAttributes {
    height: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReviewEntry {
    id: Label,
    author: Author,
    title: Label,
    content: Label,
    #[serde(rename = "im:rating")]
    rating: Label,
    updated: Label,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Author {
    name: Label,
}

/// Decodes the top-podcasts chart.
pub struct TopChartDecoder;

impl Decode for TopChartDecoder {
    type Output = Vec<PodcastSummary>;

    fn decode(bytes: &[u8]) -> Result<Self::Output, StoreError> {
        let envelope: Envelope = serde_json::from_slice(bytes)?;
        let entries: Vec<ChartEntry> = envelope.into_entries()?;
        trace!("Decoded {} chart entries", entries.len());

        Ok(entries
            .into_iter()
            .map(|e| PodcastSummary {
                image_url: select_largest_image(
                    e.images.iter().map(|i| (i.attributes.height.as_str(), i.label.as_str())),
                ),
                id: e.id.attributes.id,
                artist: e.artist.label,
                name: e.name.label,
            })
            .collect())
    }
}

/// Decodes a customer-reviews feed. A feed without entries yields no reviews.
pub struct ReviewsDecoder;

impl Decode for ReviewsDecoder {
    type Output = Vec<Review>;

    fn decode(bytes: &[u8]) -> Result<Self::Output, StoreError> {
        let envelope: Envelope = serde_json::from_slice(bytes)?;
        let entries: Vec<ReviewEntry> = envelope.into_entries()?;
        trace!("Decoded {} review entries", entries.len());

        Ok(entries
            .into_iter()
            .map(|e| Review {
                id: e.id.label,
                author: e.author.name.label,
                title: e.title.label,
                content: e.content.label,
                rating_stars: parse_rating(&e.rating.label),
                published_at: parse_date(&e.updated.label),
            })
            .collect())
    }
}

/// Picks the label of the tallest image from `(height, label)` pairs.
///
/// Unparsable heights count as 0. On equal heights the first image wins.
/// Returns an empty string when there are no images.
pub fn select_largest_image<'a, I>(images: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut best: Option<(u32, &str)> = None;

    for (height, label) in images {
        let height = height.parse().unwrap_or(0);
        match best {
            Some((max, _)) if height <= max => {}
            _ => best = Some((height, label)),
        }
    }

    best.map(|(_, label)| label.to_string()).unwrap_or_default()
}

/// Parses a star rating, clamped to 0..=5. Unparsable text yields 0.
pub fn parse_rating(s: &str) -> u8 {
    s.parse::<i64>().map(|v| v.clamp(0, 5) as u8).unwrap_or(0)
}

/// Parses an RFC 3339 timestamp. Unparsable text yields [`unknown_date`].
pub fn parse_date(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|_| unknown_date())
}

/// Placeholder for a review whose date could not be read: 0001-01-01T00:00:00Z.
pub fn unknown_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_largest_image_picks_tallest() {
        let images = [("170", "small.jpg"), ("250", "medium.jpg"), ("500", "large.jpg")];
        assert_eq!(select_largest_image(images), "large.jpg");
    }

    #[test]
    fn test_select_largest_image_first_already_largest() {
        let images = [("500", "large.jpg"), ("170", "small.jpg")];
        assert_eq!(select_largest_image(images), "large.jpg");
    }

    #[test]
    fn test_select_largest_image_tie_keeps_first() {
        let images = [("170", "small.jpg"), ("500", "first.jpg"), ("500", "second.jpg")];
        assert_eq!(select_largest_image(images), "first.jpg");
    }

    #[test]
    fn test_select_largest_image_bad_heights() {
        let images = [("abc", "bad.jpg"), ("55", "ok.jpg")];
        assert_eq!(select_largest_image(images), "ok.jpg");

        let images = [("abc", "bad.jpg"), ("", "worse.jpg")];
        assert_eq!(select_largest_image(images), "bad.jpg");
    }

    #[test]
    fn test_select_largest_image_empty() {
        assert_eq!(select_largest_image(std::iter::empty()), "");
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("5"), 5);
        assert_eq!(parse_rating("3"), 3);
        assert_eq!(parse_rating("0"), 0);
        assert_eq!(parse_rating("invalid"), 0);
        assert_eq!(parse_rating(""), 0);
        assert_eq!(parse_rating("-1"), 0);
        assert_eq!(parse_rating("12"), 5);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2021-03-14T10:15:00-07:00");
        assert_eq!(date, Utc.with_ymd_and_hms(2021, 3, 14, 17, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_date_invalid_is_year_one() {
        let unknown = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("yesterday"), unknown);
        assert_eq!(parse_date(""), unknown);
        assert_eq!(unknown_date().format("%Y-%m-%d").to_string(), "0001-01-01");
    }

    #[test]
    fn test_top_chart_decode() {
        let json = r#"{"feed": {"entry": [
            {
                "id": {"label": "https://example.com/id1", "attributes": {"im:id": "1"}},
                "im:artist": {"label": "Artist One"},
                "im:name": {"label": "Show One"},
                "im:image": [
                    {"label": "55.png", "attributes": {"height": "55"}},
                    {"label": "170.png", "attributes": {"height": "170"}},
                    {"label": "60.png", "attributes": {"height": "60"}}
                ]
            },
            {
                "id": {"attributes": {"im:id": "2"}},
                "im:artist": {"label": "Artist Two"},
                "im:name": {"label": "Show Two"}
            }
        ]}}"#;

        let podcasts = TopChartDecoder::decode(json.as_bytes()).unwrap();
        assert_eq!(podcasts.len(), 2);
        assert_eq!(podcasts[0].id, "1");
        assert_eq!(podcasts[0].artist, "Artist One");
        assert_eq!(podcasts[0].name, "Show One");
        assert_eq!(podcasts[0].image_url, "170.png");
        assert_eq!(podcasts[1].id, "2");
        assert_eq!(podcasts[1].image_url, "");
    }

    #[test]
    fn test_top_chart_wrong_shape() {
        let result = TopChartDecoder::decode(br#"{"feed": {"entry": [{"im:name": "flat"}]}}"#);
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_reviews_decode() {
        let json = r#"{"feed": {"entry": [{
            "author": {"uri": {"label": "https://example.com/u"}, "name": {"label": "listener42"}},
            "updated": {"label": "2021-03-14T10:15:00-07:00"},
            "im:rating": {"label": "4"},
            "id": {"label": "7001"},
            "title": {"label": "Solid show"},
            "content": {"label": "Always learn something.", "attributes": {"type": "text"}}
        }]}}"#;

        let reviews = ReviewsDecoder::decode(json.as_bytes()).unwrap();
        assert_eq!(reviews.len(), 1);
        let review = &reviews[0];
        assert_eq!(review.id, "7001");
        assert_eq!(review.author, "listener42");
        assert_eq!(review.title, "Solid show");
        assert_eq!(review.content, "Always learn something.");
        assert_eq!(review.rating_stars, 4);
        assert_eq!(review.published_at, Utc.with_ymd_and_hms(2021, 3, 14, 17, 15, 0).unwrap());
    }

    #[test]
    fn test_reviews_malformed_fields_degrade() {
        let json = r#"{"feed": {"entry": [{
            "id": {"label": "1"},
            "im:rating": {"label": "five"},
            "updated": {"label": "last tuesday"}
        }]}}"#;

        let reviews = ReviewsDecoder::decode(json.as_bytes()).unwrap();
        assert_eq!(reviews[0].rating_stars, 0);
        assert_eq!(reviews[0].published_at, unknown_date());
        assert_eq!(reviews[0].author, "");
    }

    #[test]
    fn test_reviews_without_entries() {
        let json = r#"{"feed": {"author": {"name": {"label": "iTunes Store"}}, "updated": {"label": "x"}}}"#;
        assert!(ReviewsDecoder::decode(json.as_bytes()).unwrap().is_empty());

        assert!(ReviewsDecoder::decode(br#"{"feed": {"entry": []}}"#).unwrap().is_empty());
        assert!(ReviewsDecoder::decode(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_reviews_single_entry_object() {
        let json = r#"{"feed": {"entry": {"id": {"label": "9"}, "im:rating": {"label": "2"}}}}"#;
        let reviews = ReviewsDecoder::decode(json.as_bytes()).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "9");
        assert_eq!(reviews[0].rating_stars, 2);
    }

    #[test]
    fn test_reviews_not_json() {
        let result = ReviewsDecoder::decode(b"<rss/>");
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }
}
