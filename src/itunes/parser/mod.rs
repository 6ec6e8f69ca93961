//! Decoders for iTunes payloads.
//!
//! The directory speaks two unrelated JSON dialects:
//!
//! - a flat `{"results": [...]}` list (search, lookup), see [`results`]
//! - an Atom-like `{"feed": {"entry": [...]}}` envelope whose scalar values are
//!   wrapped in `{"label": ...}` objects (top charts, customer reviews), see [`feed`]
//!
//! Each endpoint gets its own [`Decode`] implementation.

pub mod feed;
pub mod results;

use crate::itunes::error::StoreError;

pub use feed::{
    parse_date, parse_rating, select_largest_image, unknown_date, ReviewsDecoder, TopChartDecoder,
};
pub use results::{LookupDecoder, SearchDecoder};

/// Turns a raw response body into a domain value.
pub trait Decode {
    type Output;

    fn decode(bytes: &[u8]) -> Result<Self::Output, StoreError>;
}
